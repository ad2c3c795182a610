mod args;

use args::{Cli, Commands, CommonArgs};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use aria_modes::{CipherSpec, Key, Mode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("--aad is only valid with --mode ccm or gcm")]
    AadInvalidMode,

    #[error("--iv is not valid with --mode ecb")]
    IvInvalidMode,

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64 input: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("input too short: {len} bytes, need at least {need} for IV and tag")]
    ShortInput { len: usize, need: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cipher(#[from] aria_modes::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match aria_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn aria_cli() -> Result<(), CliError> {
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt(enc) => {
            let spec = cipher_spec(&enc.common);
            let aad = parse_aad(&enc.common, spec.mode)?;
            let plaintext = fs::read(&enc.common.input)?;

            // read or generate key
            let key = if enc.gen_key {
                let key = Key::random(enc.key_size.into())?;
                fs::write(&enc.common.key, key.as_bytes())?;
                key.as_bytes().to_vec()
            } else {
                fs::read(&enc.common.key)?
            };

            let iv = match (&enc.iv, spec.mode) {
                (Some(_), Mode::Ecb) => return Err(CliError::IvInvalidMode),
                (Some(hex_iv), _) => hex::decode(hex_iv.trim())?,
                (None, mode) => aria_modes::random_iv(mode.default_iv_len())?,
            };
            let iv_opt = spec.mode.requires_iv().then_some(iv.as_slice());

            let start = Instant::now();
            let sealed = aria_modes::encrypt(&spec, &key, iv_opt, aad.as_deref(), &plaintext)?;
            let duration = start.elapsed();

            // container: IV || ciphertext || tag
            let mut out = Vec::with_capacity(iv.len() + sealed.ciphertext.len() + spec.tag_len);
            out.extend_from_slice(&iv);
            out.extend_from_slice(&sealed.ciphertext);
            if let Some(tag) = &sealed.tag {
                out.extend_from_slice(tag);
            }

            if enc.common.base64 {
                fs::write(&enc.common.output, BASE64.encode(&out))?;
            } else {
                fs::write(&enc.common.output, &out)?;
            }
            println!(
                "Encrypted {} bytes with {} in {} ms",
                plaintext.len(),
                spec,
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(dec) => {
            let spec = cipher_spec(&dec.common);
            let aad = parse_aad(&dec.common, spec.mode)?;
            let key = fs::read(&dec.common.key)?;

            let raw = fs::read(&dec.common.input)?;
            let input = if dec.common.base64 {
                let text: String = String::from_utf8_lossy(&raw)
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                BASE64.decode(text)?
            } else {
                raw
            };

            let iv_len = if spec.mode.requires_iv() {
                dec.iv_len.unwrap_or(spec.mode.default_iv_len())
            } else {
                0
            };
            let tag_len = if spec.mode.is_aead() { spec.tag_len } else { 0 };
            if input.len() < iv_len + tag_len {
                return Err(CliError::ShortInput {
                    len: input.len(),
                    need: iv_len + tag_len,
                });
            }

            let (iv, rest) = input.split_at(iv_len);
            let (ciphertext, tag) = rest.split_at(rest.len() - tag_len);
            let iv_opt = spec.mode.requires_iv().then_some(iv);
            let tag_opt = spec.mode.is_aead().then_some(tag);

            let start = Instant::now();
            let plaintext =
                aria_modes::decrypt(&spec, &key, iv_opt, aad.as_deref(), ciphertext, tag_opt)?;
            let duration = start.elapsed();

            fs::write(&dec.common.output, &plaintext)?;
            println!(
                "Decrypted {} bytes with {} in {} ms",
                plaintext.len(),
                spec,
                duration.as_millis()
            );
            Ok(())
        }
    }
}

fn cipher_spec(common: &CommonArgs) -> CipherSpec {
    CipherSpec::new(common.alg.into(), common.mode.into()).with_tag_len(common.tag_len)
}

fn parse_aad(common: &CommonArgs, mode: Mode) -> Result<Option<Vec<u8>>, CliError> {
    match &common.aad {
        Some(_) if !mode.is_aead() => Err(CliError::AadInvalidMode),
        Some(aad) => {
            let hex_aad: String = aad.chars().filter(|c| !c.is_whitespace()).collect();
            Ok(Some(hex::decode(hex_aad)?))
        }
        None => Ok(None),
    }
}
