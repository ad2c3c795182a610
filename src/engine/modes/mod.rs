mod cbc;
mod ccm;
mod cfb;
mod ctr;
mod cts;
mod ecb;
mod gcm;
mod ofb;
pub(crate) mod util;

pub use cbc::{cbc_decrypt, cbc_encrypt};
pub use ccm::{ccm_decrypt, ccm_encrypt};
pub use cfb::{cfb_decrypt, cfb_encrypt};
pub use ctr::ctr_apply;
pub use cts::{cts_decrypt, cts_encrypt};
pub use ecb::{ecb_decrypt, ecb_encrypt};
pub use gcm::{gcm_decrypt, gcm_encrypt};
pub use ofb::ofb_apply;
