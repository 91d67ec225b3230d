//! Client construction and the interactive login flow.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use dialoguer::Input;
use grammers_client::{Client, Config as ClientConfig, InitParams, SignInError};
use grammers_session::Session;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, ScanError};

/// Connects to Telegram and ensures the client is authorized.
///
/// With a `SESSION_STRING` the saved session is restored; without one the
/// interactive login flow runs (phone number, verification code, optional
/// 2FA password) and a fresh session string is printed for reuse.
pub async fn connect(config: &Config) -> Result<Client> {
    let session = match &config.session_string {
        Some(encoded) => decode_session(encoded)?,
        None => Session::new(),
    };

    let client = Client::connect(ClientConfig {
        session,
        api_id: config.api_id,
        api_hash: config.api_hash.clone(),
        params: InitParams::default(),
    })
    .await
    .map_err(|e| ScanError::api("connecting to Telegram", e))?;

    let authorized = client
        .is_authorized()
        .await
        .map_err(|e| ScanError::api("checking authorization", e))?;

    if !authorized {
        login(&client).await?;
        println!("\n✨ Save this session string for future use:");
        println!("📝 SESSION_STRING={}", export_session(&client));
    }

    Ok(client)
}

/// Serializes the client's current session as a base64 string suitable
/// for the `SESSION_STRING` variable.
pub fn export_session(client: &Client) -> String {
    BASE64.encode(client.session().save())
}

/// Runs the terminal login flow against an unauthorized client.
async fn login(client: &Client) -> Result<()> {
    println!("📱 First time login - Authentication required\n");

    let phone = prompt("📞 Enter your phone number")?;
    let token = client
        .request_login_code(&phone)
        .await
        .map_err(|e| ScanError::api("requesting login code", e))?;

    let code = prompt("✉️  Enter the verification code")?;
    match client.sign_in(&token, &code).await {
        Ok(_) => {}
        Err(SignInError::PasswordRequired(password_token)) => {
            let password = prompt("🔐 Enter your 2FA password")?;
            client
                .check_password(password_token, password.trim())
                .await
                .map_err(|e| ScanError::api("checking 2FA password", e))?;
        }
        Err(err) => return Err(ScanError::api("signing in", err)),
    }

    info!("login complete");
    Ok(())
}

fn decode_session(encoded: &str) -> Result<Session> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| ScanError::session(format!("not valid base64: {e}")))?;
    Session::load(&bytes)
        .map_err(|e| ScanError::session(format!("could not load session data: {e:?}")))
}

fn prompt(text: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(text)
        .interact_text()
        .map_err(|e| ScanError::api("reading terminal input", e))?;
    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_session_rejects_invalid_base64() {
        let err = match decode_session("!!! not base64 !!!") {
            Ok(_) => panic!("expected decode_session to reject invalid base64"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Invalid session string"));
    }
}
