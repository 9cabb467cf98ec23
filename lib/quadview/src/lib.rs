#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;
pub mod store;

pub mod model {
    pub use quadview_model::*;
}

pub mod common {
    pub use quadview_common::*;
}

pub mod logical {
    pub use quadview_logical::*;
}

pub mod storage {
    pub use quadview_storage::*;
}
