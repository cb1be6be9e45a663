pub mod email_and_password;
