use super::{escape, field_error, form_alert, layout};
use crate::error::ValidationErrors;
use crate::session::Flash;

pub fn login_page(flash: Option<Flash>, error: Option<&str>, username: &str) -> String {
    let body = format!(
        r#"<h2>Login</h2>
{alert}
<form action="/login" method="post">
  <div class="form-group">
    <input class="form-control" autofocus type="text" name="username" placeholder="Username" value="{username}">
  </div>
  <div class="form-group">
    <input class="form-control" type="password" name="password" placeholder="Password">
  </div>
  <input class="btn btn-primary" type="submit" value="Login">
</form>
Don't have an account? <a href="/register">Register here.</a>"#,
        alert = form_alert(error),
        username = escape(username),
    );
    layout("Login", None, flash, &body)
}

pub fn register_page(
    errors: Option<&ValidationErrors>,
    alert: Option<&str>,
    username: &str,
    email: &str,
) -> String {
    let body = format!(
        r#"<h2>Register</h2>
{alert}
<form action="/register" method="post">
  <div class="form-group">
    <input class="form-control" autofocus type="text" name="username" placeholder="Username" value="{username}">
    {username_error}
  </div>
  <div class="form-group">
    <input class="form-control" type="email" name="email" placeholder="Email Address" value="{email}">
    {email_error}
  </div>
  <div class="form-group">
    <input class="form-control" type="password" name="password" placeholder="Password">
    {password_error}
  </div>
  <div class="form-group">
    <input class="form-control" type="password" name="confirmation" placeholder="Confirm Password">
    {confirmation_error}
  </div>
  <input class="btn btn-primary" type="submit" value="Register">
</form>
Already have an account? <a href="/login">Log In here.</a>"#,
        alert = form_alert(alert),
        username = escape(username),
        email = escape(email),
        username_error = field_error(errors, "username"),
        email_error = field_error(errors, "email"),
        password_error = field_error(errors, "password"),
        confirmation_error = field_error(errors, "confirmation"),
    );
    layout("Register", None, None, &body)
}
