//! Category caption templates, hashtag sets and posting tips.

use crate::content::classifier::{lookup, tokenize};
use crate::content::seed::pick_index;
use crate::error::{InstaGenError, Result};
use crate::models::{ContentBundle, ContentCategory, Style};
use std::collections::{HashMap, HashSet};

const MAX_TEXT_CHARS: usize = 100;
const MAX_ALT_TEXT_CHARS: usize = 150;
const EMPTY_SUBJECT: &str = "moment";

pub const BASE_HASHTAGS: [&str; 5] = [
    "#instagood",
    "#photooftheday",
    "#instadaily",
    "#picoftheday",
    "#creative",
];

/// Extra tags for prompts naming a well-known subject; first match wins.
const KEYWORD_HASHTAGS: &[(&str, &[&str])] = &[
    ("sunset", &["#Sunset", "#GoldenHour", "#SkyArt", "#NatureArt"]),
    ("ocean", &["#Ocean", "#Seascape", "#BlueArt", "#WaterArt"]),
    ("forest", &["#Forest", "#NatureArt", "#TreeArt", "#GreenArt"]),
    ("mountain", &["#Mountain", "#Landscape", "#PeakViews", "#NaturePhotography"]),
    ("flower", &["#FlowerArt", "#Botanical", "#NatureArt", "#BloomArt"]),
    ("coffee", &["#CoffeeArt", "#CafeVibes", "#MorningArt"]),
    ("city", &["#CityArt", "#UrbanArt", "#Skyline", "#ArchitectureArt"]),
];

pub const DEFAULT_TIP: &str =
    "💡 Post consistently and engage with your audience for the best results! Original visuals are trending right now 🔥";

/// A category's caption templates, hashtags and alt-text pattern.
///
/// Templates may contain `{text}` (the cleaned input) and `{subject}` (its
/// first one or two words).
#[derive(Debug, Clone)]
pub struct TemplateFamily {
    pub captions: Vec<String>,
    pub hashtags: Vec<String>,
    pub alt_text: String,
}

impl TemplateFamily {
    pub fn new(captions: &[&str], hashtags: &[&str], alt_text: &str) -> Self {
        Self {
            captions: captions.iter().map(|c| c.to_string()).collect(),
            hashtags: hashtags.iter().map(|h| h.to_string()).collect(),
            alt_text: alt_text.to_string(),
        }
    }
}

fn builtin_families() -> HashMap<ContentCategory, TemplateFamily> {
    let mut families = HashMap::new();

    families.insert(
        ContentCategory::Food,
        TemplateFamily::new(
            &[
                "Absolutely delicious! This {text} looks incredible and is making me hungry just looking at it 🤤 Food brings people together and tells stories of culture and love. What's your favorite way to enjoy {subject}?",
                "Good food, good mood! {text} is pure perfection on a plate 🍽️ Every bite tells a story worth sharing. Would you try this?",
                "Feast your eyes on this {text} 😋 Some dishes are made to be remembered. Tag someone you'd share this with!",
            ],
            &[
                "#food", "#delicious", "#foodie", "#yummy", "#instafood", "#foodporn", "#tasty",
                "#cooking", "#meal", "#hungry",
            ],
            "A mouth-watering image of {text} that showcases culinary excellence and appetizing presentation.",
        ),
    );
    families.insert(
        ContentCategory::People,
        TemplateFamily::new(
            &[
                "Beautiful moment captured! This {text} shows the power of authentic human connection 😊 Every person has a unique story to tell. Who would you share this moment with?",
                "Real smiles, real stories ✨ {text} is what life is all about. Tag the people who make your days brighter!",
                "Every face tells a story, every moment becomes a memory. This {subject} shot says it all. What's the story behind your favorite photo?",
            ],
            &[
                "#portrait", "#people", "#lifestyle", "#authentic", "#moments", "#human",
                "#smile", "#life", "#story", "#connection",
            ],
            "A heartwarming portrait featuring {text} with genuine emotion and human connection.",
        ),
    );
    families.insert(
        ContentCategory::Nature,
        TemplateFamily::new(
            &[
                "Nature's masterpiece! This stunning {text} reminds us of the incredible beauty that surrounds us every day 🌿 Where do you go to reconnect with nature?",
                "Lost in the beauty of {text} 🌅 The natural world never fails to inspire. Save this for your next escape!",
                "Some views just stop you in your tracks. {text} is pure magic ✨ Take a moment to breathe it in. Where would you love to be right now?",
            ],
            &[
                "#nature", "#beautiful", "#outdoors", "#landscape", "#natural", "#scenic",
                "#peaceful", "#earth", "#adventure", "#explore",
            ],
            "A breathtaking natural scene featuring {text} in all its natural glory.",
        ),
    );
    families.insert(
        ContentCategory::Animal,
        TemplateFamily::new(
            &[
                "Absolutely adorable! This sweet {text} just melts my heart 🐾 Animals bring pure joy and unconditional love into our lives. Tell me about your furry friend!",
                "Cuteness overload! {text} is everything today 😻 Tag someone who needs to see this!",
                "Unconditional love in one frame 🐶 This {subject} moment is pure happiness. Double tap if it made you smile!",
            ],
            &[
                "#animals", "#pets", "#cute", "#adorable", "#love", "#furry", "#wildlife",
                "#nature", "#companion", "#joy",
            ],
            "An endearing image of {text} showing natural animal behavior and irresistible charm.",
        ),
    );
    families.insert(
        ContentCategory::Vehicle,
        TemplateFamily::new(
            &[
                "What an amazing ride! This {text} represents freedom, adventure and the thrill of the open road 🚗 Where would you drive it first?",
                "Built for the journey. {text} turns every road into an adventure 🛣️ Share your dream road trip below!",
                "Engines, wheels and endless horizons. This {subject} is ready to go. Who's riding shotgun?",
            ],
            &[
                "#car", "#vehicle", "#drive", "#road", "#adventure", "#freedom", "#journey",
                "#automotive", "#travel", "#lifestyle",
            ],
            "An impressive image of {text} showcasing automotive design and the spirit of adventure.",
        ),
    );
    families.insert(
        ContentCategory::Architecture,
        TemplateFamily::new(
            &[
                "Incredible architecture! This {text} showcases human creativity and engineering excellence 🏗️ Buildings tell the story of our civilization. Which city has your favorite skyline?",
                "Urban adventures await 🏙️ {text} is pure energy and design. Save this for your travel list!",
                "Lines, light and imagination. This {subject} view proves design is everywhere. What's the most beautiful building you've seen?",
            ],
            &[
                "#architecture", "#building", "#design", "#urban", "#city", "#modern",
                "#construction", "#engineering", "#structure", "#art",
            ],
            "An architectural image featuring {text} with impressive design elements and structural beauty.",
        ),
    );
    families.insert(
        ContentCategory::Technology,
        TemplateFamily::new(
            &[
                "Innovation at its finest! This {text} represents the technology that connects our world 📱 Every device tells a story of human ingenuity. What gadget could you not live without?",
                "The future is already here. {text} in all its sleek glory ⚡ Drop your favorite tech tip below!",
                "Clean setup, clear mind. This {subject} is pure engineering elegance. What does your workspace look like?",
            ],
            &[
                "#technology", "#tech", "#innovation", "#digital", "#modern", "#gadget",
                "#device", "#future", "#smart", "#electronic",
            ],
            "A technology image showcasing {text} with modern design and cutting-edge functionality.",
        ),
    );
    families.insert(
        ContentCategory::Fashion,
        TemplateFamily::new(
            &[
                "Style perfection! This {text} shows incredible fashion sense 👗 Fashion tells the world who we are without saying a word. What's your go-to look?",
                "Outfit on point ✨ {text} is giving all the right vibes. Would you wear this?",
                "Confidence is the best accessory. This {subject} look proves it. Tag your style twin!",
            ],
            &[
                "#fashion", "#style", "#outfit", "#ootd", "#trendy", "#chic", "#fashionista",
                "#stylish", "#look", "#clothing",
            ],
            "A stylish fashion image featuring {text} with excellent taste and creative expression.",
        ),
    );
    families.insert(
        ContentCategory::General,
        TemplateFamily::new(
            &[
                "Perfectly captured! This {text} tells such a unique and interesting story ✨ Every image has the power to inspire and connect. What story does this tell you?",
                "Mesmerized by this {subject} creation 🎨 {text} is pure visual magic. Share your thoughts below!",
                "Capturing moments like this one! {text} is the perfect blend of creativity and inspiration. What caught your eye first?",
            ],
            &[
                "#photography", "#creative", "#art", "#visual", "#story", "#moment",
                "#beautiful", "#inspiration", "#life", "#share",
            ],
            "A creative and engaging image featuring {text} with artistic composition and visual appeal.",
        ),
    );

    families
}

pub fn keyword_hashtags(raw_text: &str) -> &'static [&'static str] {
    lookup(raw_text, KEYWORD_HASHTAGS).copied().unwrap_or(&[])
}

pub fn style_hashtags(style: Style) -> &'static [&'static str] {
    match style {
        Style::Realistic => &["#PhotoRealistic", "#DigitalPhotography", "#RealisticArt"],
        Style::Artistic => &["#AbstractArt", "#DigitalPainting", "#ConceptualArt"],
        Style::Cartoon => &["#CartoonArt", "#Animation", "#DigitalIllustration"],
        Style::Vintage => &["#VintageArt", "#RetroStyle", "#ClassicArt"],
        Style::Modern => &["#ModernArt", "#ContemporaryArt", "#MinimalArt"],
    }
}

/// Posting tip for a style, or the generic tip when none was chosen.
pub fn tip_for(style: Option<Style>) -> &'static str {
    match style {
        Some(Style::Realistic) => "💡 Post during peak hours (7-9 PM) for maximum engagement. Realistic shots perform well on LinkedIn and Facebook!",
        Some(Style::Artistic) => "💡 Share the creative process in your stories! Artistic content gets great engagement on Instagram and Pinterest.",
        Some(Style::Cartoon) => "💡 Perfect for TikTok and Instagram Reels! Add fun music and watch the engagement soar 🚀",
        Some(Style::Vintage) => "💡 Vintage content performs amazingly on Pinterest! Consider creating a vintage board for better reach.",
        Some(Style::Modern) => "💡 Modern visuals resonate well on professional platforms. Great for LinkedIn posts about creativity and innovation!",
        None => DEFAULT_TIP,
    }
}

/// Cleans, deduplicates (case-insensitively) and bounds a hashtag sequence.
///
/// Tags gain a leading `#` when missing; trailing punctuation is dropped.
pub fn normalize_hashtags<I, S>(tags: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for tag in tags {
        if result.len() >= max {
            break;
        }
        let cleaned: String = tag
            .as_ref()
            .trim()
            .trim_start_matches('#')
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if cleaned.is_empty() {
            continue;
        }
        if seen.insert(cleaned.to_lowercase()) {
            result.push(format!("#{}", cleaned));
        }
    }

    result
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

fn display_text(raw_text: &str) -> String {
    let collapsed = raw_text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        EMPTY_SUBJECT.to_string()
    } else {
        truncate_chars(&collapsed, MAX_TEXT_CHARS)
    }
}

fn subject(raw_text: &str) -> String {
    let words: Vec<String> = raw_text.split_whitespace().take(2).map(str::to_lowercase).collect();
    if words.is_empty() || tokenize(raw_text).is_empty() {
        EMPTY_SUBJECT.to_string()
    } else {
        words.join(" ")
    }
}

fn render(template: &str, text: &str, subject: &str) -> String {
    template.replace("{text}", text).replace("{subject}", subject)
}

/// Maps a category and its source text to a deterministic content bundle.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    max_hashtags: usize,
    families: HashMap<ContentCategory, TemplateFamily>,
}

impl TemplateResolver {
    pub fn new(max_hashtags: usize) -> Self {
        Self {
            max_hashtags,
            families: builtin_families(),
        }
    }

    /// A resolver with no template families; callers register their own.
    pub fn empty(max_hashtags: usize) -> Self {
        Self {
            max_hashtags,
            families: HashMap::new(),
        }
    }

    pub fn with_family(mut self, category: ContentCategory, family: TemplateFamily) -> Self {
        self.families.insert(category, family);
        self
    }

    pub fn max_hashtags(&self) -> usize {
        self.max_hashtags
    }

    fn family(&self, category: ContentCategory) -> Result<&TemplateFamily> {
        self.families
            .get(&category)
            .filter(|family| !family.captions.is_empty())
            .ok_or_else(|| {
                InstaGenError::ConfigurationError(format!(
                    "no caption templates configured for category '{}'",
                    category
                ))
            })
    }

    /// Category hashtags first, then any subject keyword tags, then the base
    /// set, then the style set.
    pub fn hashtags(
        &self,
        category: ContentCategory,
        raw_text: &str,
        style: Option<Style>,
    ) -> Result<Vec<String>> {
        let family = self.family(category)?;
        let keyword_tags = keyword_hashtags(raw_text);
        let style_tags = style_hashtags(style.unwrap_or_default());

        let all = family
            .hashtags
            .iter()
            .map(String::as_str)
            .chain(keyword_tags.iter().copied())
            .chain(BASE_HASHTAGS.iter().copied())
            .chain(style_tags.iter().copied());

        Ok(normalize_hashtags(all, self.max_hashtags))
    }

    pub fn image_description(&self, category: ContentCategory, raw_text: &str) -> Result<String> {
        let family = self.family(category)?;
        let text = truncate_chars(&display_text(raw_text), MAX_ALT_TEXT_CHARS);
        Ok(render(&family.alt_text, &text, &subject(raw_text)))
    }

    pub fn resolve(
        &self,
        category: ContentCategory,
        raw_text: &str,
        style: Option<Style>,
    ) -> Result<ContentBundle> {
        let family = self.family(category)?;
        let index = pick_index(raw_text, family.captions.len()).unwrap_or(0);

        let text = display_text(raw_text);
        let caption = render(&family.captions[index], &text, &subject(raw_text));

        Ok(ContentBundle {
            caption,
            hashtags: self.hashtags(category, raw_text, style)?,
            image_description: self.image_description(category, raw_text)?,
            tips: Some(tip_for(style).to_string()),
        })
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_HASHTAGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_scenario() {
        let resolver = TemplateResolver::default();
        let bundle = resolver
            .resolve(ContentCategory::Food, "delicious pizza", None)
            .unwrap();
        assert!(bundle.caption.contains("pizza"));
        assert!(bundle.hashtags.contains(&"#food".to_string()));
        assert!(bundle.image_description.contains("delicious pizza"));
        assert_eq!(bundle.tips.as_deref(), Some(DEFAULT_TIP));
    }

    #[test]
    fn test_empty_text_is_well_formed() {
        let resolver = TemplateResolver::default();
        let bundle = resolver.resolve(ContentCategory::General, "", None).unwrap();
        assert!(!bundle.caption.is_empty());
        assert!(bundle.caption.contains(EMPTY_SUBJECT));
        assert!(!bundle.hashtags.is_empty());
        assert!(!bundle.caption.contains("{text}"));
        assert!(!bundle.caption.contains("{subject}"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = TemplateResolver::default();
        for category in ContentCategory::ALL {
            for style in [None, Some(Style::Vintage)] {
                let a = resolver.resolve(category, "golden retriever at the park", style).unwrap();
                let b = resolver.resolve(category, "golden retriever at the park", style).unwrap();
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_hashtags_bounded_and_unique() {
        for max in [5, 10, 15, 30] {
            let resolver = TemplateResolver::new(max);
            for category in ContentCategory::ALL {
                for style in Style::ALL {
                    let tags = resolver.hashtags(category, "sunset over the city", Some(style)).unwrap();
                    assert!(tags.len() <= max);
                    let unique: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
                    assert_eq!(unique.len(), tags.len());
                }
            }
        }
    }

    #[test]
    fn test_category_tags_survive_tight_limit() {
        let resolver = TemplateResolver::new(5);
        let tags = resolver.hashtags(ContentCategory::Food, "coffee", None).unwrap();
        assert_eq!(tags.len(), 5);
        assert_eq!(tags[0], "#food");
    }

    #[test]
    fn test_style_tags_fill_remaining_slots() {
        let resolver = TemplateResolver::new(30);
        let tags = resolver
            .hashtags(ContentCategory::General, "abstract", Some(Style::Cartoon))
            .unwrap();
        assert!(tags.contains(&"#CartoonArt".to_string()));
        // "#creative" appears in both the general and base sets
        assert_eq!(
            tags.iter().filter(|t| t.eq_ignore_ascii_case("#creative")).count(),
            1
        );
    }

    #[test]
    fn test_keyword_tags_follow_category_tags() {
        let resolver = TemplateResolver::new(30);
        let tags = resolver
            .hashtags(ContentCategory::Food, "morning coffee", None)
            .unwrap();
        let cafe = tags.iter().position(|t| t == "#CafeVibes").unwrap();
        let base = tags.iter().position(|t| t == "#instagood").unwrap();
        assert!(tags[..cafe].contains(&"#food".to_string()));
        assert!(cafe < base);

        // first matching subject wins
        assert_eq!(keyword_hashtags("sunset over the ocean")[1], "#GoldenHour");
        assert!(keyword_hashtags("a quiet desk").is_empty());
        // whole words only
        assert!(keyword_hashtags("electricity bill").is_empty());
    }

    #[test]
    fn test_tips_by_style() {
        assert_ne!(tip_for(Some(Style::Cartoon)), DEFAULT_TIP);
        assert_eq!(tip_for(None), DEFAULT_TIP);
        for style in Style::ALL {
            assert!(tip_for(Some(style)).starts_with("💡"));
        }
    }

    #[test]
    fn test_missing_family_is_configuration_error() {
        let resolver = TemplateResolver::empty(10);
        let err = resolver
            .resolve(ContentCategory::Fashion, "jacket", None)
            .unwrap_err();
        match err {
            InstaGenError::ConfigurationError(msg) => assert!(msg.contains("fashion")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_long_text_is_truncated() {
        let resolver = TemplateResolver::default();
        let long = "pizza ".repeat(100);
        let bundle = resolver.resolve(ContentCategory::Food, &long, None).unwrap();
        assert!(bundle.caption.contains("..."));
        assert!(bundle.image_description.len() < 400);
    }

    #[test]
    fn test_normalize_hashtags() {
        let tags = normalize_hashtags(["food", "#Food", "#yummy,", "#", "  #tasty  "], 10);
        assert_eq!(tags, vec!["#food", "#yummy", "#tasty"]);
    }
}
