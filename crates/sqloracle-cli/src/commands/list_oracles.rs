use sqloracle_oracles::OracleKind;

/// The oracle catalog, one line per kind. The header is only printed for a
/// terminal so the output stays easy to pipe.
pub fn render(header: bool) -> String {
    let mut out = String::new();
    if header {
        out.push_str(&format!("{:>10} {:<20}\n", "oracle", "versions"));
    }
    for kind in OracleKind::ALL {
        let versions = if kind.version_independent() {
            "any".to_string()
        } else {
            kind.versions()
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!("{:>10} {:<20}\n", kind.name(), versions));
    }
    out
}
