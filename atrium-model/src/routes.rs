//! Route definitions shared between the server and its clients/tests.

pub mod auth {
    pub const REGISTER: &str = "/auth/register";
    pub const LOGIN: &str = "/auth/login";
}

pub mod user {
    pub const COLLECTION: &str = "/user";
    pub const DETAILS: &str = "/user/details";
    pub const ITEM: &str = "/user/{id}";
}

pub const HEALTH: &str = "/health";

/// Substitute a `{param}` placeholder in a route template.
///
/// Handy for tests and clients that build concrete paths from the constants
/// above.
pub fn replace_param(template: &str, param: &str, value: &str) -> String {
    template.replace(param, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_template_substitutes_id() {
        assert_eq!(replace_param(user::ITEM, "{id}", "42"), "/user/42");
    }
}
