//! Rendering of the canonical SPDX header.

use super::registry::AuthorSpanRegistry;

/// Render the header for `registry`, one `SPDX-FileCopyrightText` line per
/// author followed by an empty comment line and the license identifier.
///
/// `maintainer` is listed first when present in the registry; all other
/// authors follow in registry order.
pub fn render_header(
    registry: &AuthorSpanRegistry,
    maintainer: Option<&str>,
    license: &str,
    marker: &str,
) -> Vec<String> {
    let hoisted = maintainer.and_then(|name| registry.get(name).map(|span| (name, span)));

    let mut lines: Vec<String> = hoisted
        .into_iter()
        .chain(
            registry
                .iter()
                .filter(|(author, _)| Some(*author) != maintainer),
        )
        .map(|(author, span)| format!("{marker} SPDX-FileCopyrightText: {span} {author}"))
        .collect();

    lines.push(format!("{marker} "));
    lines.push(format!("{marker} SPDX-License-Identifier: {license}"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::registry::RegistryBuilder;
    use crate::notice::span::YearSpan;

    #[test]
    fn test_current_year_only() {
        let registry = RegistryBuilder::new().finish(Some("Org A"), 2025);
        assert_eq!(
            render_header(&registry, Some("Org A"), "BSD-3-Clause", "//"),
            vec![
                "// SPDX-FileCopyrightText: 2025 Org A",
                "// ",
                "// SPDX-License-Identifier: BSD-3-Clause",
            ]
        );
    }

    #[test]
    fn test_maintainer_is_hoisted() {
        let mut builder = RegistryBuilder::new();
        builder.unite("Org B", YearSpan::new(2019, 2021));
        builder.unite("Org C", YearSpan::single(2018));
        builder.unite("Org A", YearSpan::single(2020));
        let registry = builder.finish(None, 2025);

        assert_eq!(
            render_header(&registry, Some("Org A"), "MIT", "#"),
            vec![
                "# SPDX-FileCopyrightText: 2020 Org A",
                "# SPDX-FileCopyrightText: 2019-2021 Org B",
                "# SPDX-FileCopyrightText: 2018 Org C",
                "# ",
                "# SPDX-License-Identifier: MIT",
            ]
        );
    }

    #[test]
    fn test_absent_maintainer_is_not_invented() {
        let mut builder = RegistryBuilder::new();
        builder.extend("Org B", 2019);
        let registry = builder.finish(None, 2025);

        let header = render_header(&registry, Some("Org A"), "MIT", "//");
        assert_eq!(header[0], "// SPDX-FileCopyrightText: 2019 Org B");
        assert_eq!(header.len(), 3);
    }

    #[test]
    fn test_empty_registry_still_has_license() {
        let registry = RegistryBuilder::new().finish(None, 2025);
        assert_eq!(
            render_header(&registry, None, "MIT", "//"),
            vec!["// ", "// SPDX-License-Identifier: MIT"]
        );
    }
}
