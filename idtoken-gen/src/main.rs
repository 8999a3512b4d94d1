use clap::Parser;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

/// Mint a Cognito-shaped ID token for exercising the edge gate locally.
///
/// The gate only decodes the payload (no signature check), so the token is
/// signed with a throwaway HS256 secret:
/// - claims: sub, email, exp, iat, auth_time, iss, aud, token_use
/// - `iss` is built from region + user pool like the real issuer
/// - output: the token, or a `Cookie:` header line ready for curl
#[derive(Parser, Debug)]
#[command(name = "idtoken-gen", version, about)]
struct Args {
    /// User pool region, e.g. ap-southeast-2
    #[arg(long)]
    region: String,

    /// User pool id, e.g. ap-southeast-2_AbCdEf123
    #[arg(long)]
    user_pool_id: String,

    /// App client id (becomes `aud` and part of the SDK cookie name)
    #[arg(long)]
    client_id: String,

    #[arg(long)]
    email: Option<String>,

    #[arg(long, default_value = "local-dev-user")]
    sub: String,

    /// Lifetime in seconds from now
    #[arg(long, default_value_t = 3600)]
    ttl_seconds: i64,

    /// Emit a token that expired a minute ago
    #[arg(long, default_value_t = false)]
    expired: bool,

    /// `token_use` claim; anything but "id" is rejected by the gate
    #[arg(long, default_value = "id")]
    token_use: String,

    #[arg(long, default_value = "local-dev-only")]
    secret: String,

    /// Print `Cookie: CognitoIdentityServiceProvider.<client>.LastAuthUser.idToken=<token>`
    #[arg(long, default_value_t = false)]
    cookie: bool,
}

#[derive(Debug, Serialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    exp: i64,
    iat: i64,
    auth_time: i64,
    iss: String,
    aud: String,
    token_use: String,
}

fn build_claims(args: &Args, now: i64) -> IdTokenClaims {
    let exp = if args.expired {
        now - 60
    } else {
        now + args.ttl_seconds
    };

    IdTokenClaims {
        sub: args.sub.clone(),
        email: args.email.clone(),
        exp,
        iat: now,
        auth_time: now,
        iss: format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            args.region, args.user_pool_id
        ),
        aud: args.client_id.clone(),
        token_use: args.token_use.clone(),
    }
}

fn sign(claims: &IdTokenClaims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some("local-dev".to_string());
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let claims = build_claims(&args, chrono::Utc::now().timestamp());
    let token = sign(&claims, &args.secret)?;

    if args.cookie {
        println!(
            "Cookie: CognitoIdentityServiceProvider.{}.LastAuthUser.idToken={}",
            args.client_id, token
        );
    } else {
        println!("{}", token);
    }

    Ok(())
}
