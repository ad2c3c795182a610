mod cipher;
mod core;
mod error;
mod interface;
mod key;
mod mode;
mod modes;
mod padding;
mod util;

pub use cipher::{AesCipher, AriaCipher, Cipher};
pub use self::core::{Aes, Aria, BLOCK_SIZE, Block, BlockCipher};
pub use error::{Error, Result};
pub use interface::{Sealed, decrypt, encrypt};
pub use key::{Key, KeySize};
pub use mode::{Algorithm, CipherSpec, Mode};
pub use padding::{pad, unpad};
pub use util::random_iv;
