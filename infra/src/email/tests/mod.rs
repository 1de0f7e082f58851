mod resend_tests;
