//! Company details collected during onboarding.

use nk_shared::FieldErrors;
use serde::Serialize;
use validator::Validate;

use super::{field_errors_from, fields, FormData, FormSchema};

/// `POST /onboarding/company`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForm {
    #[validate(length(max = 100, message = "Company name is too long"))]
    pub name: String,

    #[validate(length(max = 200, message = "Address is too long"))]
    pub address_line1: String,

    #[validate(length(max = 200, message = "Address is too long"))]
    pub address_line2: Option<String>,

    #[validate(length(max = 100, message = "City is too long"))]
    pub city: String,

    #[validate(length(max = 100, message = "State is too long"))]
    pub state: String,

    #[validate(length(max = 20, message = "Zip code is too long"))]
    pub zip_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl FormSchema for CompanyForm {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = fields::required(form, "name", &mut errors);
        let address_line1 = fields::required(form, "addressLine1", &mut errors);
        let city = fields::required(form, "city", &mut errors);
        let state = fields::required(form, "state", &mut errors);
        let zip_code = fields::required(form, "zipCode", &mut errors);

        let (Some(name), Some(address_line1), Some(city), Some(state), Some(zip_code)) =
            (name, address_line1, city, state, zip_code)
        else {
            return Err(errors);
        };

        let company = Self {
            name,
            address_line1,
            address_line2: fields::optional(form, "addressLine2"),
            city,
            state,
            zip_code,
            redirect_to: fields::optional(form, "redirectTo"),
        };

        if let Err(validation_errors) = company.validate() {
            errors.merge(field_errors_from(&validation_errors));
        }
        errors.into_result(company)
    }
}
