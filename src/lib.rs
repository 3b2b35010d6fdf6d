//! Dotted-path reflective access and mutation.
//!
//! A script such as `owner.rename(%1).len()` walks an object graph one
//! segment at a time, reading fields and calling methods that were
//! registered through [`reflect::derive`].
//!
//! - [`reflect`]: the class model, i.e. the `Reflect` trait, class metadata,
//!   method invokers and the class registry.
//! - [`script`]: parsing, argument binding, member resolution and evaluation.
//!
//! # Example
//!
//! ```
//! use refpath::reflect::derive::{Reflect, reflect_methods};
//! use refpath::reflect::Reflect;
//!
//! #[derive(Reflect)]
//! #[reflect(methods, crate_path = "::refpath::reflect")]
//! struct Account {
//!     owner: String,
//!     balance: i64,
//! }
//!
//! #[reflect_methods(crate_path = "::refpath::reflect")]
//! impl Account {
//!     fn deposit(&mut self, amount: i64) -> i64 {
//!         self.balance += amount;
//!         self.balance
//!     }
//! }
//!
//! let mut account = Account { owner: String::from("ada"), balance: 10 };
//!
//! let balance = refpath::script::reflect_with_args(
//!     &mut account,
//!     "deposit(%1)",
//!     vec![5_i64.into_boxed_reflect()],
//! )
//! .unwrap();
//! assert_eq!(balance.downcast_ref::<i64>(), Some(&15));
//!
//! let len = refpath::script::reflect(&mut account, "owner.len()").unwrap();
//! assert_eq!(len.downcast_ref::<usize>(), Some(&3));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use rp_reflect as reflect;
pub use rp_script as script;

pub use rp_script::{Reflector, ScriptError};
