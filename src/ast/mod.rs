use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! make_ast_enum {
    ( $enum_name:ident, [ $( $variant:ident ),* $( , )? ] ) => {
        #[derive(Debug, Clone)]
        pub enum $enum_name {
            $( $variant($variant), )*
        }
        $(
            impl From<$variant> for $enum_name {
                fn from(val: $variant) -> $enum_name {
                    $enum_name::$variant(val)
                }
            }
        )*
    }
}

pub mod dbg;
pub mod expr;
pub mod stmt;

/// A process-unique id attached to every identifier node. Keys the
/// interpreter's table of resolved scope depths.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AstId(u64);

impl AstId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        AstId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}
