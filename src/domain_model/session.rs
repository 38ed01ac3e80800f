/// The resolved owner of a request: a verified account email, or nobody.
///
/// `Anonymous` is a normal state, not an error. Gated operations check it
/// explicitly; public operations ignore it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Identity {
    User(String),
    Anonymous,
}

impl Identity {
    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::User(email) => Some(email),
            Identity::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}
