/// Constants module to avoid magic numbers in the codebase

// Network configuration
pub const DEFAULT_REGION: &str = "us-east-1";
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;

// UI configuration
pub const UI_POLL_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_PAGE_LINES: u16 = 10;
pub const UI_DEFAULT_VIEWPORT_HEIGHT: u16 = 20;

// Static link shown under the sidebar debug info
pub const HOW_IT_WORKS_URL: &str =
    "http://howitworksrazorpay.s3-website-us-east-1.amazonaws.com/";

// Suggested questions offered while the transcript is still empty
pub const PRESET_QUESTIONS: [&str; 4] = [
    "List all the OWASP Top 10 for LLMs?",
    "Who won the F1 Italian Grand Prix?",
    "What is a Knowledge Base in AWS Bedrock?",
    "Summarize threat vectors in an LLM-based RAG pipeline.",
];
