use crate::app::{embedder::openai::DEFAULT_EMBEDDING_MODEL, llm::openai::DEFAULT_CHAT_MODEL};
use crate::core::service::query::{DEFAULT_MATCH_COUNT, DEFAULT_MATCH_THRESHOLD};
use clap::{Args, Parser};
use pdfrag_chunx::window::TOKEN_WINDOW_DEFAULT_MAX_TOKENS;

/// The default directory to ingest documents from.
const DEFAULT_INPUT_DIR: &str = "samples";
/// The default address to listen on.
const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
/// Allows every origin.
const DEFAULT_ALLOWED_ORIGINS: &str = "*";

#[cfg(feature = "supabase")]
const DEFAULT_STORE: &str = "supabase";
#[cfg(not(feature = "supabase"))]
const DEFAULT_STORE: &str = "memory";

/// Arguments for the HTTP server binary.
#[derive(Debug, Parser)]
#[command(name = "pdfrag", version = "0.1", about = "Answer questions from your documents", long_about = None)]
pub struct ServerArgs {
    #[command(flatten)]
    pub start: StartArgs,
}

/// Configuration shared by every binary. Each option falls back to its
/// environment variable and then to a default.
#[derive(Debug, Default, Args)]
pub struct StartArgs {
    /// RUST_LOG string to use as the env filter.
    #[arg(short, long)]
    log: Option<String>,

    /// Address to listen on.
    #[arg(short, long)]
    address: Option<String>,

    /// Chunk store to use; `supabase`, `postgres` or `memory`.
    #[arg(long)]
    store: Option<String>,

    /// Directory to ingest documents from.
    #[arg(long)]
    input_dir: Option<String>,

    /// Comma separated CORS allowed origins, `*` allows any.
    #[arg(long)]
    cors_allowed_origins: Option<String>,

    /// Maximum amount of tokens per chunk.
    #[arg(long)]
    max_tokens: Option<String>,

    /// Minimum similarity of chunks used as context.
    #[arg(long)]
    match_threshold: Option<String>,

    /// Maximum amount of chunks used as context.
    #[arg(long)]
    match_count: Option<String>,

    /// OpenAI embedding model.
    #[arg(long)]
    embedding_model: Option<String>,

    /// OpenAI chat model.
    #[arg(long)]
    chat_model: Option<String>,

    /// OpenAI API endpoint.
    #[arg(long)]
    openai_url: Option<String>,

    /// Supabase project URL.
    #[cfg(feature = "supabase")]
    #[arg(long)]
    supabase_url: Option<String>,

    /// Database URL.
    #[cfg(feature = "postgres")]
    #[arg(long)]
    db_url: Option<String>,
}

/// Implement a getter method on [StartArgs], using the `$var` environment variable as a fallback
/// and either panic, warn or default if neither the argument nor the environment variable is set.
macro_rules! arg {
    ($id:ident, $var:literal, panic $msg:literal) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => panic!($msg),
                    },
                }
            }
        }
    };
    ($id:ident, $var:literal, warn $msg:literal) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => {
                            tracing::warn!($msg);
                            String::new()
                        }
                    },
                }
            }
        }
    };
    ($id:ident, $var:literal, default $value:expr) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => $value,
                    },
                }
            }
        }
    };
    ($id:ident: $ty:ty, $var:literal, default $value:expr) => {
        impl StartArgs {
            pub fn $id(&self) -> $ty {
                let val = match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => return $value,
                    },
                };
                match val.trim().parse() {
                    Ok(val) => val,
                    Err(e) => panic!("Invalid {} '{val}'; {e}", $var),
                }
            }
        }
    };
}

impl StartArgs {
    pub fn allowed_origins(&self) -> Vec<String> {
        let origins = match &self.cors_allowed_origins {
            Some(origins) => origins.clone(),
            None => std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        };

        origins
            .split(',')
            .map(str::trim)
            .filter_map(|o| (!o.is_empty()).then_some(String::from(o)))
            .collect()
    }

    /// Environment only, secrets are not accepted as arguments.
    pub fn openai_key(&self) -> String {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                tracing::warn!("OPENAI_API_KEY not set; OpenAI requests will be rejected");
                String::new()
            }
        }
    }

    /// Environment only, secrets are not accepted as arguments.
    #[cfg(feature = "supabase")]
    pub fn supabase_key(&self) -> String {
        match std::env::var("SUPABASE_ANON_KEY") {
            Ok(key) => key,
            Err(_) => {
                tracing::warn!("SUPABASE_ANON_KEY not set; Supabase requests will be rejected");
                String::new()
            }
        }
    }
}

arg!(log,             "RUST_LOG",        default "info".to_string());
arg!(address,         "ADDRESS",         default DEFAULT_ADDRESS.to_string());
arg!(store,           "STORE",           default DEFAULT_STORE.to_string());
arg!(input_dir,       "INPUT_DIR",       default DEFAULT_INPUT_DIR.to_string());
arg!(embedding_model, "EMBEDDING_MODEL", default DEFAULT_EMBEDDING_MODEL.to_string());
arg!(chat_model,      "CHAT_MODEL",      default DEFAULT_CHAT_MODEL.to_string());
arg!(openai_url,      "OPENAI_URL",      default pdfrag_openai::DEFAULT_OPENAI_ENDPOINT.to_string());

arg!(max_tokens: usize,      "MAX_TOKENS",      default TOKEN_WINDOW_DEFAULT_MAX_TOKENS);
arg!(match_threshold: f64,   "MATCH_THRESHOLD", default DEFAULT_MATCH_THRESHOLD);
arg!(match_count: usize,     "MATCH_COUNT",     default DEFAULT_MATCH_COUNT);

#[cfg(feature = "supabase")]
arg!(supabase_url,    "SUPABASE_URL",    warn    "SUPABASE_URL not set; Pass --supabase-url or set SUPABASE_URL");

#[cfg(feature = "postgres")]
arg!(db_url,          "DATABASE_URL",    panic   "Database url not found; Pass --db-url or set DATABASE_URL");
