//! Knowledge Base — read-only category → ordered (label, text) entries.
//! Built once at startup and shared by every request; no write path exists.
//!
//! Alternate knowledge sets load from TOML using arrays of tables so entry
//! order survives parsing:
//!
//! ```toml
//! [[category]]
//! name = "青花瓷"
//!
//! [[category.entry]]
//! label = "明代特征"
//! text = "使用苏麻离青料"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WenjianError, WenjianResult};

/// One labeled fact (era style, identification checklist, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub label: String,
    pub text: String,
}

impl KnowledgeEntry {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeCategory {
    pub name: String,
    #[serde(rename = "entry", default)]
    pub entries: Vec<KnowledgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(rename = "category", default)]
    categories: Vec<KnowledgeCategory>,
}

impl KnowledgeBase {
    /// Validates and wraps the given categories. Declaration order is kept.
    pub fn new(mut categories: Vec<KnowledgeCategory>) -> WenjianResult<Self> {
        let mut seen = HashSet::new();
        for category in &mut categories {
            category.name = category.name.trim().to_string();
            let name = category.name.as_str();
            if name.is_empty() {
                return Err(WenjianError::KnowledgeFormat(
                    "category name is empty".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(WenjianError::KnowledgeFormat(format!(
                    "duplicate category: {}",
                    name
                )));
            }
            if category.entries.is_empty() {
                return Err(WenjianError::KnowledgeFormat(format!(
                    "category has no entries: {}",
                    name
                )));
            }
        }
        Ok(Self { categories })
    }

    /// Reference antique knowledge: porcelain, bronze, painting, jade.
    pub fn builtin() -> Self {
        fn category(name: &str, entries: [(&str, &str); 3]) -> KnowledgeCategory {
            KnowledgeCategory {
                name: name.to_string(),
                entries: entries
                    .into_iter()
                    .map(|(label, text)| KnowledgeEntry::new(label, text))
                    .collect(),
            }
        }

        Self {
            categories: vec![
                category(
                    "青花瓷",
                    [
                        ("明代特征", "使用苏麻离青料，发色浓艳，有铁锈斑，纹饰疏朗大气"),
                        ("清代特征", "采用浙料，发色纯蓝，纹饰繁密精细，层次丰富"),
                        ("鉴定要点", "一看青料发色，二观胎体质地，三辨纹饰风格，四识款识年代"),
                    ],
                ),
                category(
                    "青铜器",
                    [
                        ("商周特征", "形制古朴厚重，纹饰神秘庄严，多饕餮纹、云雷纹"),
                        ("春秋战国特征", "工艺精湛细腻，出现失蜡法，纹饰更加写实"),
                        ("鉴定要点", "一看锈色层次，二听敲击声音，三辨纹饰工艺，四识铭文内容"),
                    ],
                ),
                category(
                    "书画",
                    [
                        ("唐代风格", "以人物画为主，线条流畅有力，色彩富丽堂皇"),
                        ("宋代风格", "重视写实意境，山水画成就最高，讲究笔墨韵味"),
                        ("鉴定要点", "一看笔墨功力，二观纸绢材质，三识款印特征，四辨时代风格"),
                    ],
                ),
                category(
                    "玉器",
                    [
                        ("新石器时代", "造型古朴神秘，多为祭祀礼器，工艺简单粗犷"),
                        ("明清时期", "工艺精湛细腻，题材丰富多样，多为陈设玩赏"),
                        ("鉴定要点", "一看玉质温润度，二观雕工精细度，三识纹饰时代性，四辨沁色自然度"),
                    ],
                ),
            ],
        }
    }

    pub fn from_toml_str(s: &str) -> WenjianResult<Self> {
        let parsed: KnowledgeBase = toml::from_str(s)?;
        Self::new(parsed.categories)
    }

    /// Load a knowledge set from a TOML file on disk.
    pub fn load(path: impl AsRef<Path>) -> WenjianResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let kb = Self::from_toml_str(&raw)?;
        tracing::info!(
            "[WENJIAN KNOWLEDGE] Loaded {} categories from {}",
            kb.categories.len(),
            path.as_ref().display()
        );
        Ok(kb)
    }

    /// Entries for `category` in declaration order.
    pub fn lookup(&self, category: &str) -> WenjianResult<&[KnowledgeEntry]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.entries.as_slice())
            .ok_or_else(|| WenjianError::CategoryNotFound(category.to_string()))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.name == category)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
