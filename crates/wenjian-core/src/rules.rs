//! Classification rules: ordered (category, trigger keywords) pairs, first match wins.
//!
//! Rule order is part of the contract. The generic authentication rule sits
//! after the four knowledge categories so "鉴定" inside a jade question still
//! routes to jade.

use crate::knowledge::KnowledgeBase;

/// Rule outcome. The four knowledge categories render from the knowledge base;
/// the rest are fixed replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ceramics,
    Bronze,
    Painting,
    Jade,
    Authentication,
    Greeting,
    Thanks,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ceramics => "ceramics",
            Category::Bronze => "bronze",
            Category::Painting => "painting",
            Category::Jade => "jade",
            Category::Authentication => "authentication",
            Category::Greeting => "greeting",
            Category::Thanks => "thanks",
        }
    }

    /// Knowledge base key, for categories that render from knowledge.
    pub fn knowledge_name(&self) -> Option<&'static str> {
        match self {
            Category::Ceramics => Some("青花瓷"),
            Category::Bronze => Some("青铜器"),
            Category::Painting => Some("书画"),
            Category::Jade => Some("玉器"),
            _ => None,
        }
    }

    pub fn header(&self) -> Option<&'static str> {
        match self {
            Category::Ceramics => Some("🏺 **青花瓷专业鉴定指南**"),
            Category::Bronze => Some("⚱️ **青铜器专业鉴定指南**"),
            Category::Painting => Some("🖼️ **书画专业鉴定指南**"),
            Category::Jade => Some("💎 **玉器专业鉴定指南**"),
            _ => None,
        }
    }

    /// Closing advisory sentence.
    pub fn tip(&self) -> Option<&'static str> {
        match self {
            Category::Ceramics => Some("青花瓷鉴定需要结合实物观察，建议找专业机构检测。"),
            Category::Bronze => Some("青铜器鉴定要注意锈色的自然程度和铸造工艺。"),
            Category::Painting => Some("书画鉴定需要丰富的经验和专业知识，建议多方求证。"),
            Category::Jade => Some("玉器鉴定要注意材质、工艺和沁色的自然变化。"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full-width ASCII folded to ASCII, then lower-cased. No stemming, no tokenization.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '\u{3000}' => ' ',
            _ => c,
        })
        .collect::<String>()
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    pub category: Category,
    keywords: Vec<String>,
}

impl ClassificationRule {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| normalize(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// `normalized` must already have gone through [`normalize`].
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

/// Knowledge categories referenced by rules but absent from the knowledge base,
/// and knowledge categories no rule can reach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleAudit {
    pub missing: Vec<String>,
    pub unreachable: Vec<String>,
}

impl RuleAudit {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unreachable.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<ClassificationRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            ClassificationRule::new(Category::Ceramics, ["青花瓷", "瓷器", "陶瓷"]),
            ClassificationRule::new(Category::Bronze, ["青铜", "铜器", "青铜器"]),
            ClassificationRule::new(Category::Painting, ["书画", "字画", "绘画", "国画"]),
            ClassificationRule::new(Category::Jade, ["玉器", "玉石", "玉雕", "古玉"]),
            ClassificationRule::new(
                Category::Authentication,
                ["鉴定", "真伪", "真假", "鉴别", "评估"],
            ),
            ClassificationRule::new(Category::Greeting, ["你好", "您好", "hello", "hi"]),
            ClassificationRule::new(Category::Thanks, ["谢谢", "感谢", "thank"]),
        ])
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// First rule, in declaration order, with a keyword contained in `message`.
    pub fn classify(&self, message: &str) -> Option<Category> {
        let normalized = normalize(message);
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.category)
    }

    /// Cross-checks rule targets against the knowledge base.
    pub fn audit(&self, knowledge: &KnowledgeBase) -> RuleAudit {
        let referenced: Vec<&'static str> = self
            .rules
            .iter()
            .filter_map(|r| r.category.knowledge_name())
            .collect();

        let mut audit = RuleAudit::default();
        for name in &referenced {
            if !knowledge.contains(name) && !audit.missing.iter().any(|m| m == name) {
                audit.missing.push(name.to_string());
            }
        }
        for name in knowledge.category_names() {
            if !referenced.contains(&name) {
                audit.unreachable.push(name.to_string());
            }
        }
        audit
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
