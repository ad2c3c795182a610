use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, author, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt input to output
    Encrypt(EncryptArgs),

    /// Decrypt input to output
    Decrypt(DecryptArgs),
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct CommonArgs {
    /// Block cipher.
    #[arg(
        short = 'a',
        long = "alg",
        value_enum,
        env = "ARIA_MODES_ALG",
        default_value_t = Alg::Aria,
    )]
    pub alg: Alg,

    /// Mode of operation.
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        env = "ARIA_MODES_MODE",
        default_value_t = Mode::Gcm,
    )]
    pub mode: Mode,

    /// Input file path.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file path.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Key file path (raw 16, 24, or 32 bytes).
    #[arg(short = 'k', long = "key")]
    pub key: PathBuf,

    /// Additional authenticated data, provided as hex string (optional, CCM and GCM only)
    #[arg(long = "aad", value_name = "HEX")]
    pub aad: Option<String>,

    /// Tag length in bytes (CCM and GCM only).
    #[arg(long = "tag-len", default_value_t = 16)]
    pub tag_len: usize,

    /// Ciphertext file is Base64 text instead of raw bytes.
    #[arg(long = "base64")]
    pub base64: bool,
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Generate a random key (written to path specified by key)
    #[arg(long = "gen-key")]
    pub gen_key: bool,

    /// Only valid with --gen-key.
    #[arg(
        long = "key-size",
        value_enum,
        default_value_t = KeySize::Bits256,
        requires = "gen_key"
    )]
    pub key_size: KeySize,

    /// IV or nonce as hex. A random one of the mode's default length is generated if omitted.
    #[arg(long = "iv", value_name = "HEX")]
    pub iv: Option<String>,
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Length of the IV or nonce at the start of the input, if not the mode's default.
    #[arg(long = "iv-len")]
    pub iv_len: Option<usize>,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum KeySize {
    #[value(name = "128")]
    Bits128,
    #[value(name = "192")]
    Bits192,
    #[value(name = "256")]
    Bits256,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum Alg {
    #[value(name = "aria", alias = "ARIA")]
    Aria,
    #[value(name = "aes", alias = "AES")]
    Aes,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum Mode {
    #[value(name = "ecb", alias = "ECB")]
    Ecb,
    #[value(name = "cbc", alias = "CBC")]
    Cbc,
    #[value(name = "cfb", alias = "CFB")]
    Cfb,
    #[value(name = "ofb", alias = "OFB")]
    Ofb,
    #[value(name = "ctr", alias = "CTR")]
    Ctr,
    #[value(name = "cts", alias = "CTS")]
    Cts,
    #[value(name = "ccm", alias = "CCM")]
    Ccm,
    #[value(name = "gcm", alias = "GCM")]
    Gcm,
}

impl From<KeySize> for aria_modes::KeySize {
    fn from(size: KeySize) -> Self {
        match size {
            KeySize::Bits128 => aria_modes::KeySize::Bits128,
            KeySize::Bits192 => aria_modes::KeySize::Bits192,
            KeySize::Bits256 => aria_modes::KeySize::Bits256,
        }
    }
}

impl From<Alg> for aria_modes::Algorithm {
    fn from(alg: Alg) -> Self {
        match alg {
            Alg::Aria => aria_modes::Algorithm::Aria,
            Alg::Aes => aria_modes::Algorithm::Aes,
        }
    }
}

impl From<Mode> for aria_modes::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Ecb => aria_modes::Mode::Ecb,
            Mode::Cbc => aria_modes::Mode::Cbc,
            Mode::Cfb => aria_modes::Mode::Cfb,
            Mode::Ofb => aria_modes::Mode::Ofb,
            Mode::Ctr => aria_modes::Mode::Ctr,
            Mode::Cts => aria_modes::Mode::Cts,
            Mode::Ccm => aria_modes::Mode::Ccm,
            Mode::Gcm => aria_modes::Mode::Gcm,
        }
    }
}
