pub struct Limits {
    // Login limits
    pub max_login_length: usize,
    pub max_password_length: usize,
}

pub static LIMITS: Limits = Limits {
    max_login_length: 32,
    max_password_length: 256,
};
