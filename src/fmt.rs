/// Two decimals with thousands separators, no currency symbol: -1,234.56
pub fn amount(val: f64) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if val < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{dec_part}")
}
