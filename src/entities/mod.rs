// Entity Models
// Identity is the (category, lowercase name) pair; usage values change over time.
//
// - Category: closed set of six buckets
// - Garment: one article of clothing plus its wear history summary

pub mod category;
pub mod garment;

pub use category::Category;
pub use garment::{
    amount_to_cents, cents_to_amount, name_key, parse_wear_date, Garment, MAX_COST_CENTS,
    NOT_WORN_MARKER, WEAR_DATE_FORMAT,
};
