// Service exports
pub mod supabase;

pub use supabase::{AuthUser, SupabaseClient, SupabaseError, SupabaseTables};
