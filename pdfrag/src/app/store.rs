/// In process store.
pub mod memory;

#[cfg(feature = "supabase")]
pub mod supabase;

#[cfg(feature = "postgres")]
pub mod pg;
