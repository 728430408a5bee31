use storefront_domain::id::UserId;

pub(crate) fn history(user: UserId) -> String {
    format!("history_{user}")
}

pub(crate) fn sms_code(mobile: &str) -> String {
    format!("sms_{mobile}")
}

pub(crate) fn access_token(token: &str) -> String {
    format!("token:access:{token}")
}

pub(crate) fn email_token(token: &str) -> String {
    format!("token:email:{token}")
}
