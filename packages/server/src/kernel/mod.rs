//! Kernel module - infrastructure traits and concrete clients.

pub mod firecrawl;
pub mod openai;
pub mod test_dependencies;
pub mod traits;

pub use firecrawl::FirecrawlExtractor;
pub use openai::OpenAIChatModel;
pub use test_dependencies::{ExtractCallArgs, MockChatModel, MockExtractor};
pub use traits::{BaseChatModel, BaseExtractor};
