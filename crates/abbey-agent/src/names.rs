//! Brother names.

use abbey_core::SimRng;

/// Religious names handed out to new brothers.
pub const BROTHER_NAMES: [&str; 7] = [
    "Simon", "Paul", "Robert", "Richard", "John", "Matthew", "Peter",
];

/// A random name of the form `"Brother Simon"`.  Names may repeat.
pub fn brother_name(rng: &mut SimRng) -> String {
    let name = rng.choose(&BROTHER_NAMES).copied().unwrap_or(BROTHER_NAMES[0]);
    format!("Brother {name}")
}
