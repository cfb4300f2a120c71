/// Category used when an expense has no category or a blank one.
pub const MISC_CATEGORY: &str = "Misc/Other";

const DEFAULT_CATEGORIES: [&str; 18] = [
    "Charity/Donations",
    "Childcare",
    "Debt Payments",
    "Dining Out/Takeout",
    "Education",
    "Entertainment",
    "Healthcare",
    "Hobbies/Recreation",
    "Housing",
    "Insurance",
    "Personal Care",
    "Pets",
    "Savings/Investments",
    "Subscriptions/Memberships",
    "Transportation",
    "Travel",
    "Utilities",
    MISC_CATEGORY,
];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect()
}

/// Resolves the grouping key for an optional category.
pub fn category_or_misc(category: Option<&str>) -> &str {
    match category {
        Some(name) if !name.trim().is_empty() => name,
        _ => MISC_CATEGORY,
    }
}
