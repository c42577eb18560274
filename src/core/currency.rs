//! INR formatting for amounts held in paise

pub const CURRENCY_SYMBOL: &str = "₹";

/// Format paise as rupees with Indian digit grouping
///
/// Fractions are only shown when present (`26000` is `₹260`, `26050` is
/// `₹260.5`). Zero and negative amounts have no meaningful price and render
/// as `N/A`.
pub fn format_inr(paise: i64) -> String {
    if paise <= 0 {
        return "N/A".to_string();
    }

    let rupees = paise / 100;
    let fraction = paise % 100;

    let mut out = String::from(CURRENCY_SYMBOL);
    out.push_str(&group_indian(rupees));
    if fraction != 0 {
        if fraction % 10 == 0 {
            out.push_str(&format!(".{}", fraction / 10));
        } else {
            out.push_str(&format!(".{:02}", fraction));
        }
    }
    out
}

// Last three digits, then groups of two: 12,34,567
fn group_indian(value: i64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
