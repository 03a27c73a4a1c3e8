/// Answers the hosting platform's `validate` probe with the owner's phone number.
#[derive(Debug, Clone)]
pub struct IdentityValidator {
    phone_number: String,
}

impl IdentityValidator {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
        }
    }

    pub fn validate(&self) -> String {
        self.phone_number.clone()
    }
}
