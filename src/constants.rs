// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how the pipeline
//! behaves: how hard it retries, how long it waits, where it writes.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Search API boundaries
// ---------------------------------------------------------------------------

/// Base URL of the twitterapi.io advanced search endpoint.
pub const SEARCH_API_URL: &str = "https://api.twitterapi.io/twitter/tweet/advanced_search";

/// Ranking mode requested from the search API.
pub const SEARCH_QUERY_TYPE: &str = "Top";

/// How many times a single page fetch is attempted before the collection
/// run gives up and returns what it has.
pub const SEARCH_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry of a page fetch. Doubles on every retry.
pub const SEARCH_INITIAL_BACKOFF: Duration = Duration::from_secs(2);

/// Upper bound for the page-fetch backoff delay.
pub const SEARCH_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Default query: Arabic posts making health claims, with images,
/// excluding retweets, replies, quotes and videos.
pub const DEFAULT_HEALTH_QUERY: &str = concat!(
    "(",
    "(صحة OR \"الصحة\" OR \"صحة الأطفال\" OR \"وزارة الصحة\" OR سكري OR \"ضغط الدم\" OR سمنة ",
    "OR لقاح OR تطعيم OR \"طب بديل\" OR \"وصفات طبيعية\" OR خلطات OR \"خل التفاح\" ",
    "OR \"الحبة السوداء\" OR الكركم OR \"المكملات الغذائية\" OR \"الطب النبوي\") ",
    "(يشفي OR يعالج OR \"يقضي على\" OR \"بدون دواء\" OR \"بدون أدوية\" OR \"بدون دكتور\" ",
    "OR \"بدون طبيب\" OR \"بدون آثار جانبية\" OR \"طبيعي 100%\" OR \"مضمون 100%\" ",
    "OR \"معجزة\" OR \"خلطة سحرية\" OR \"سر لا يريدونك أن تعرفه\" ",
    "OR \"الحقيقة التي لا تخبرك بها وزارة الصحة\" OR \"خداع شركات الأدوية\" ",
    "OR \"لقاح\" NEAR \"خطر\" OR \"سرطان\" NEAR \"لقاح\")",
    ") lang:ar has:images -is:retweet -is:reply -is:quote -has:videos"
);

// ---------------------------------------------------------------------------
// Network timeouts
// ---------------------------------------------------------------------------

/// Timeout for one search page request.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for fetching an image to run text extraction on.
pub const OCR_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for downloading an image during materialization.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for one classification request.
pub const CLASSIFY_TIMEOUT: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Base URL of the OpenAI-compatible chat API.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_CLASSIFIER_MODEL: &str = "gpt-4.1-mini";

/// Justification stored when the model omits one.
pub const MISSING_JUSTIFICATION: &str = "No justification provided by the model.";

// ---------------------------------------------------------------------------
// Text extraction
// ---------------------------------------------------------------------------

/// Tesseract binary used when `TESSERACT_CMD` is not set.
pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

/// Tesseract language pack used when `OCR_LANG` is not set.
pub const DEFAULT_OCR_LANG: &str = "eng";

/// Separator placed between per-image texts in the combined field.
pub const OCR_PARAGRAPH_SEPARATOR: &str = "\n\n";

// ---------------------------------------------------------------------------
// Asset materialization
// ---------------------------------------------------------------------------

/// Extension used when neither the query string nor the path names one.
pub const DEFAULT_IMAGE_EXTENSION: &str = ".jpg";

/// Path suffixes recognised in image URLs, probed in this order.
pub const KNOWN_IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpeg", ".jpg", ".webp"];

/// File-name token used for rows that carry no id.
pub const UNKNOWN_ITEM_ID: &str = "unknown";

/// Header of the image index file.
pub const INDEX_COLUMNS: [&str; 6] = [
    "item_id",
    "image_index",
    "image_path",
    "label",
    "text",
    "extracted_text",
];

// ---------------------------------------------------------------------------
// Artifact file names
// ---------------------------------------------------------------------------

pub const RAW_ITEMS_FILE: &str = "raw_health_tweets.json";
pub const ITEMS_WITH_IMAGES_FILE: &str = "health_tweets_with_images.json";
pub const ITEMS_WITH_OCR_FILE: &str = "health_tweets_with_ocr.json";
pub const LABELED_ITEMS_FILE: &str = "health_tweets_labeled.json";
pub const ITEMS_WITH_LOCAL_IMAGES_FILE: &str = "health_tweets_with_local_images.json";
pub const IMAGE_DIR: &str = "tweet_images";
pub const IMAGE_INDEX_FILE: &str = "images_index.csv";
