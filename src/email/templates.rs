pub fn render_activation(first_name: &str, activation_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Activate your account</h2>
    <p>Hi {first_name},</p>
    <p>Your account has been created. Activate it within 10 minutes:</p>
    <p><a href="{activation_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Activate Account</a></p>
    <p style="color: #666; font-size: 14px;">If you didn't expect this email, you can ignore it.</p>
</body>
</html>"#
    )
}

pub fn render_password_reset(reset_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Password Reset</h2>
    <p>A password reset was requested for your account.</p>
    <p><a href="{reset_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Reset Password</a></p>
    <p style="color: #666; font-size: 14px;">This link expires in 10 minutes. If you didn't request this, you can ignore it.</p>
</body>
</html>"#
    )
}

pub fn render_email_code(code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Your verification code</h2>
    <p style="font-size: 28px; letter-spacing: 6px; font-weight: bold;">{code}</p>
    <p style="color: #666; font-size: 14px;">The code expires in 10 minutes.</p>
</body>
</html>"#
    )
}
