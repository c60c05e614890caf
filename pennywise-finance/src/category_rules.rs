//! Deterministic keyword scoring of transaction descriptions.
//!
//! Every category scores one point per keyword found as a substring of the
//! lowercased description. The highest score wins; on a tie the category
//! declared first in `CATEGORY_KEYWORDS` keeps the win.

use pennywise_core::{CategorizedTransaction, Category, NormalizedTransaction};
use tracing::info;

/// Ordered (category, keywords) table. Order is significant for tie-breaking.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::FoodDining,
        &[
            "restaurant", "cafe", "food", "dining", "meal", "lunch", "dinner", "breakfast",
            "grocery", "supermarket", "market", "bakery", "butcher", "deli", "takeout",
            "delivery", "pizza", "burger", "sushi", "coffee", "starbucks", "mcdonalds",
        ],
    ),
    (
        Category::Transportation,
        &[
            "gas", "fuel", "petrol", "uber", "lyft", "taxi", "cab", "parking", "toll",
            "metro", "subway", "bus", "train", "airline", "flight", "car", "auto",
            "maintenance", "repair", "insurance", "registration", "dmv",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "netflix", "spotify", "hulu", "amazon prime", "youtube", "movie", "cinema",
            "theater", "concert", "show", "game", "gaming", "steam", "playstation",
            "xbox", "nintendo", "ticket", "event", "festival", "amusement", "park",
        ],
    ),
    (
        Category::Shopping,
        &[
            "amazon", "walmart", "target", "costco", "best buy", "home depot", "lowes",
            "clothing", "shoes", "apparel", "electronics", "furniture", "home", "decor",
            "jewelry", "accessories", "department store", "mall", "outlet",
        ],
    ),
    (
        Category::Utilities,
        &[
            "electric", "electricity", "gas", "water", "sewer", "trash", "waste",
            "internet", "cable", "phone", "telephone", "mobile", "cell", "utility",
            "power", "energy", "heating", "cooling", "ac", "hvac",
        ],
    ),
    (
        Category::Healthcare,
        &[
            "doctor", "hospital", "medical", "pharmacy", "drug", "medicine", "prescription",
            "dental", "vision", "eye", "optometrist", "dentist", "physician", "clinic",
            "therapy", "counseling", "psychologist", "psychiatrist", "insurance",
        ],
    ),
    (
        Category::Education,
        &[
            "school", "college", "university", "tuition", "fee", "book", "textbook",
            "course", "class", "training", "workshop", "seminar", "conference",
            "student loan", "scholarship", "grant", "library", "museum",
        ],
    ),
    (
        Category::Housing,
        &[
            "rent", "mortgage", "home", "house", "apartment", "condo", "property",
            "maintenance", "repair", "improvement", "renovation", "furniture", "appliance",
            "hoa", "association", "property tax", "insurance",
        ],
    ),
    (
        Category::PersonalCare,
        &[
            "haircut", "salon", "spa", "massage", "beauty", "cosmetic", "makeup",
            "skincare", "gym", "fitness", "workout", "exercise", "yoga", "pilates",
            "personal trainer", "nutritionist", "dietitian",
        ],
    ),
    (
        Category::Travel,
        &[
            "hotel", "lodging", "accommodation", "vacation", "trip", "journey", "tour",
            "cruise", "resort", "airbnb", "booking", "expedia", "hotels.com",
            "souvenir", "tourist", "attraction", "museum", "gallery",
        ],
    ),
];

const NO_MATCH_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 0.9;

/// Best keyword match for a description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordScore {
    pub category: Category,
    pub score: usize,
}

/// Score a description against the keyword table
pub fn score_description(description: &str) -> KeywordScore {
    let desc = description.to_lowercase();
    let mut best = KeywordScore {
        category: Category::Uncategorized,
        score: 0,
    };

    for (category, keywords) in CATEGORY_KEYWORDS {
        let score = keywords.iter().filter(|k| desc.contains(**k)).count();
        // Strict: an equal later score never displaces an earlier category
        if score > best.score {
            best = KeywordScore {
                category: *category,
                score,
            };
        }
    }

    best
}

/// Heuristic match strength: 0.3 with no match, else 0.5 + 0.1 per keyword, capped at 0.9
pub fn confidence_for(score: usize) -> f64 {
    if score == 0 {
        NO_MATCH_CONFIDENCE
    } else {
        (0.5 + 0.1 * score as f64).min(MAX_CONFIDENCE)
    }
}

/// Categorize one transaction. Income bypasses keyword categories entirely.
pub fn categorize(txn: &NormalizedTransaction) -> CategorizedTransaction {
    let best = score_description(&txn.description);
    let category = if txn.is_income() {
        Category::Income
    } else {
        best.category
    };

    CategorizedTransaction::from_normalized(txn, category, confidence_for(best.score))
}

/// Categorize a ledger, preserving order
pub fn categorize_all(txns: &[NormalizedTransaction]) -> Vec<CategorizedTransaction> {
    let out: Vec<_> = txns.iter().map(categorize).collect();
    let uncategorized = out
        .iter()
        .filter(|t| t.category == Category::Uncategorized)
        .count();
    info!(
        transactions = out.len(),
        uncategorized,
        "categorized transactions"
    );
    out
}
