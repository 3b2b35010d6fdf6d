//! Items referenced by generated code. Not public API.

pub use alloc::boxed::Box;
pub use alloc::vec;
pub use alloc::vec::Vec;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::info::ClassInfo;

    pub use inventory;

    /// A class submitted by `#[reflect(auto_register)]`.
    pub struct AutoRegisterClass(pub fn() -> &'static ClassInfo);

    inventory::collect!(AutoRegisterClass);
}
