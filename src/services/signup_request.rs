use crate::error::RequestError;

/// A signup whose fields were checked and normalized at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    activity_name: String,
    email: String,
}

impl SignupRequest {
    pub fn new(activity_name: &str, email: &str) -> Result<Self, RequestError> {
        let activity_name = activity_name.trim();
        if activity_name.is_empty() {
            return Err(RequestError::InvalidActivityName);
        }

        Ok(Self {
            activity_name: activity_name.to_string(),
            email: normalize_email(email)?,
        })
    }

    pub fn activity_name(&self) -> &str {
        &self.activity_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Trims and lowercases, so `Emma@X.edu` and `emma@x.edu` are the same student.
pub fn normalize_email(raw: &str) -> Result<String, RequestError> {
    let email = raw.trim().to_lowercase();
    let invalid = || RequestError::InvalidEmail(raw.trim().to_string());

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(email)
}
