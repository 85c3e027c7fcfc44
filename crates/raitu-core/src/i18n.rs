//! UI strings in English and Telugu.
//!
//! The active language lives in a [Translator] value that callers own and pass
//! around; there is no process-wide state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two supported UI languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Te,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Te => "te",
        }
    }

    /// The other supported language.
    pub fn other(self) -> Language {
        match self {
            Language::En => Language::Te,
            Language::Te => Language::En,
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Te => TE,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "te" => Ok(Language::Te),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language: {0} (expected `en` or `te`)")]
pub struct ParseLanguageError(String);

/// Looks up UI strings for the active language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Switch between English and Telugu. Returns the new language.
    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.other();
        tracing::debug!(language = %self.language, "language toggled");
        self.language
    }

    /// String for `key` in the active language, or `key` itself when missing.
    pub fn lookup<'a>(&self, key: &'a str) -> &'a str {
        match self.language.table().iter().find(|(k, _)| *k == key) {
            Some((_, v)) => *v,
            None => {
                tracing::debug!(key, language = %self.language, "missing translation");
                key
            }
        }
    }
}

/// Keys the other language defines that `language` does not.
pub fn missing_keys(language: Language) -> Vec<&'static str> {
    let own = language.table();
    language
        .other()
        .table()
        .iter()
        .map(|(k, _)| *k)
        .filter(|k| !own.iter().any(|(o, _)| o == k))
        .collect()
}

const EN: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "Home"),
    ("nav.scan", "Crop Scan"),
    ("nav.knowledge", "Knowledge"),
    ("nav.community", "Community"),
    ("nav.chat", "AI Assistant"),
    // Home
    ("home.hero.title", "AI-Powered Organic Advisory"),
    ("home.hero.subtitle", "Empowering tribal farmers with traditional wisdom and modern technology"),
    ("home.hero.cta", "Start Scanning Crops"),
    ("home.features.title", "Key Features"),
    ("home.features.scan.title", "Smart Crop Analysis"),
    ("home.features.scan.desc", "Upload crop photos for instant disease and pest identification"),
    ("home.features.organic.title", "Organic Solutions"),
    ("home.features.organic.desc", "Get recommendations using locally available organic materials"),
    ("home.features.community.title", "Community Wisdom"),
    ("home.features.community.desc", "Share experiences and learn from fellow farmers"),
    ("home.benefits.title", "Benefits for Tribal Farmers"),
    ("home.benefits.preserve", "Preserve traditional farming knowledge"),
    ("home.benefits.improve", "Improve crop yields organically"),
    ("home.benefits.reduce", "Reduce dependency on chemicals"),
    ("home.benefits.connect", "Connect with farming community"),
    // Crop scan
    ("scan.title", "Crop Disease Scanner"),
    ("scan.subtitle", "Upload a photo of your crop to identify issues and get organic solutions"),
    ("scan.upload", "Upload Crop Photo"),
    ("scan.capture", "Capture Photo"),
    ("scan.analyzing", "Analyzing crop image..."),
    ("scan.analysis", "Analysis Results"),
    ("scan.solutions", "Organic Solutions"),
    ("scan.newScan", "Scan Another Crop"),
    // Knowledge base
    ("knowledge.title", "Organic Farming Knowledge Base"),
    ("knowledge.subtitle", "Browse traditional and modern organic farming practices"),
    ("knowledge.search", "Search knowledge base..."),
    ("knowledge.filter.all", "All Topics"),
    ("knowledge.filter.pest", "Pest Control"),
    ("knowledge.filter.disease", "Disease Management"),
    ("knowledge.filter.soil", "Soil Health"),
    ("knowledge.filter.crop", "Crop Nutrition"),
    ("knowledge.filter.seasonal", "Seasonal Tips"),
    ("knowledge.filter.water", "Water Management"),
    ("knowledge.readMore", "Read More"),
    ("knowledge.showing", "Showing"),
    ("knowledge.article", "article"),
    ("knowledge.articles", "articles"),
    ("knowledge.noResults", "No articles found"),
    ("knowledge.noResultsDesc", "Try a different search term or topic"),
    ("knowledge.help.title", "Need personalized advice?"),
    ("knowledge.help.desc", "Ask the AI assistant about your specific crop problem"),
    ("knowledge.help.button", "Ask AI Assistant"),
    // Community
    ("community.title", "Farmer Community Forum"),
    ("community.subtitle", "Share experiences and learn from fellow farmers"),
    ("community.newPost", "Share Your Experience"),
    ("community.success", "Success Story"),
    ("community.question", "Question"),
    ("community.tip", "Farming Tip"),
    ("community.viewReplies", "View Replies"),
    ("community.reply", "Reply"),
    // AI chat
    ("chat.title", "AI Farming Assistant"),
    ("chat.subtitle", "Ask questions and upload crop images for expert advice"),
    ("chat.placeholder", "Ask about crops, diseases, organic solutions..."),
    ("chat.send", "Send"),
    ("chat.uploadImage", "Upload Image"),
    ("chat.thinking", "Analyzing..."),
    ("chat.error", "Failed to get response. Please try again."),
];

const TE: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "హోమ్"),
    ("nav.scan", "పంట స్కాన్"),
    ("nav.knowledge", "జ్ఞానం"),
    ("nav.community", "సంఘం"),
    ("nav.chat", "AI సహాయకుడు"),
    // Home
    ("home.hero.title", "AI-ఆధారిత సేంద్రీయ సలహా"),
    ("home.hero.subtitle", "సాంప్రదాయ జ్ఞానం మరియు ఆధునిక సాంకేతికతతో గిరిజన రైతులకు సాధికారత"),
    ("home.hero.cta", "పంటల స్కానింగ్ ప్రారంభించండి"),
    ("home.features.title", "ముఖ్య లక్షణాలు"),
    ("home.features.scan.title", "స్మార్ట్ పంట విశ్లేషణ"),
    ("home.features.scan.desc", "తక్షణ వ్యాధి మరియు పురుగుల గుర్తింపు కోసం పంట ఫోటోలను అప్‌లోడ్ చేయండి"),
    ("home.features.organic.title", "సేంద్రీయ పరిష్కారాలు"),
    ("home.features.organic.desc", "స్థానికంగా లభించే సేంద్రీయ పదార్థాలను ఉపయోగించి సిఫారసులు పొందండి"),
    ("home.features.community.title", "సంఘ జ్ఞానం"),
    ("home.features.community.desc", "అనుభవాలను పంచుకోండి మరియు తోటి రైతుల నుండి నేర్చుకోండి"),
    ("home.benefits.title", "గిరిజన రైతులకు ప్రయోజనాలు"),
    ("home.benefits.preserve", "సాంప్రదాయ వ్యవసాయ జ్ఞానాన్ని సంరక్షించండి"),
    ("home.benefits.improve", "సేంద్రీయంగా పంట దిగుబడిని మెరుగుపరచండి"),
    ("home.benefits.reduce", "రసాయనాలపై ఆధారపడటం తగ్గించండి"),
    ("home.benefits.connect", "వ్యవసాయ సంఘంతో కనెక్ట్ అవ్వండి"),
    // Crop scan
    ("scan.title", "పంట వ్యాధి స్కానర్"),
    ("scan.subtitle", "సమస్యలను గుర్తించడానికి మరియు సేంద్రీయ పరిష్కారాలను పొందడానికి మీ పంట ఫోటోను అప్‌లోడ్ చేయండి"),
    ("scan.upload", "పంట ఫోటో అప్‌లోడ్ చేయండి"),
    ("scan.capture", "ఫోటో తీయండి"),
    ("scan.analyzing", "పంట చిత్రాన్ని విశ్లేషిస్తోంది..."),
    ("scan.analysis", "విశ్లేషణ ఫలితాలు"),
    ("scan.solutions", "సేంద్రీయ పరిష్కారాలు"),
    ("scan.newScan", "మరో పంటను స్కాన్ చేయండి"),
    // Knowledge base
    ("knowledge.title", "సేంద్రీయ వ్యవసాయ జ్ఞాన స్థావరం"),
    ("knowledge.subtitle", "సాంప్రదాయ మరియు ఆధునిక సేంద్రీయ వ్యవసాయ పద్ధతులను బ్రౌజ్ చేయండి"),
    ("knowledge.search", "జ్ఞాన స్థావరాన్ని శోధించండి..."),
    ("knowledge.filter.all", "అన్ని అంశాలు"),
    ("knowledge.filter.pest", "పురుగుల నియంత్రణ"),
    ("knowledge.filter.disease", "వ్యాధి నిర్వహణ"),
    ("knowledge.filter.soil", "నేల ఆరోగ్యం"),
    ("knowledge.filter.crop", "పంట పోషణ"),
    ("knowledge.filter.seasonal", "కాలానుగుణ చిట్కాలు"),
    ("knowledge.filter.water", "నీటి నిర్వహణ"),
    ("knowledge.readMore", "మరింత చదవండి"),
    ("knowledge.showing", "చూపిస్తోంది"),
    ("knowledge.article", "వ్యాసం"),
    ("knowledge.articles", "వ్యాసాలు"),
    ("knowledge.noResults", "వ్యాసాలు ఏవీ కనుగొనబడలేదు"),
    ("knowledge.noResultsDesc", "వేరే పదం లేదా అంశంతో ప్రయత్నించండి"),
    ("knowledge.help.title", "వ్యక్తిగత సలహా కావాలా?"),
    ("knowledge.help.desc", "మీ పంట సమస్య గురించి AI సహాయకుడిని అడగండి"),
    ("knowledge.help.button", "AI సహాయకుడిని అడగండి"),
    // Community
    ("community.title", "రైతు సంఘ వేదిక"),
    ("community.subtitle", "అనుభవాలను పంచుకోండి మరియు తోటి రైతుల నుండి నేర్చుకోండి"),
    ("community.newPost", "మీ అనుభవాన్ని పంచుకోండి"),
    ("community.success", "విజయ కథ"),
    ("community.question", "ప్రశ్న"),
    ("community.tip", "వ్యవసాయ చిట్కా"),
    ("community.viewReplies", "ప్రత్యుత్తరాలను చూడండి"),
    ("community.reply", "ప్రత్యుత్తరం"),
    // AI chat
    ("chat.title", "AI వ్యవసాయ సహాయకుడు"),
    ("chat.subtitle", "నిపుణుల సలహా కోసం ప్రశ్నలు అడగండి మరియు పంట చిత్రాలను అప్‌లోడ్ చేయండి"),
    ("chat.placeholder", "పంటలు, వ్యాధులు, సేంద్రీయ పరిష్కారాల గురించి అడగండి..."),
    ("chat.send", "పంపండి"),
    ("chat.uploadImage", "చిత్రాన్ని అప్‌లోడ్ చేయండి"),
    ("chat.thinking", "విశ్లేషిస్తోంది..."),
    ("chat.error", "సమాధానం పొందడం విఫలమైంది. దయచేసి మళ్లీ ప్రయత్నించండి."),
];
