use alloc::vec;

use crate::impls::{impl_reflect_opaque, to_string_method};
use crate::ops::Null;

impl_reflect_opaque!((), "()", "()");
impl_reflect_opaque!(Null, "rp_reflect::ops::Null", "Null");

impl_reflect_opaque!(bool, "bool", "bool", vec![to_string_method::<bool>()]);
impl_reflect_opaque!(char, "char", "char", vec![to_string_method::<char>()]);

impl_reflect_opaque!(i8, "i8", "i8", vec![to_string_method::<i8>()]);
impl_reflect_opaque!(i16, "i16", "i16", vec![to_string_method::<i16>()]);
impl_reflect_opaque!(i32, "i32", "i32", vec![to_string_method::<i32>()]);
impl_reflect_opaque!(i64, "i64", "i64", vec![to_string_method::<i64>()]);
impl_reflect_opaque!(i128, "i128", "i128", vec![to_string_method::<i128>()]);
impl_reflect_opaque!(isize, "isize", "isize", vec![to_string_method::<isize>()]);

impl_reflect_opaque!(u8, "u8", "u8", vec![to_string_method::<u8>()]);
impl_reflect_opaque!(u16, "u16", "u16", vec![to_string_method::<u16>()]);
impl_reflect_opaque!(u32, "u32", "u32", vec![to_string_method::<u32>()]);
impl_reflect_opaque!(u64, "u64", "u64", vec![to_string_method::<u64>()]);
impl_reflect_opaque!(u128, "u128", "u128", vec![to_string_method::<u128>()]);
impl_reflect_opaque!(usize, "usize", "usize", vec![to_string_method::<usize>()]);

impl_reflect_opaque!(f32, "f32", "f32", vec![to_string_method::<f32>()]);
impl_reflect_opaque!(f64, "f64", "f64", vec![to_string_method::<f64>()]);
