pub mod openai;
pub mod util;

pub use openai::{ChatOptions, OpenAi, GROQ_BASE_URL};
pub use util::{strip_code_blocks, truncate_to_char_boundary};
