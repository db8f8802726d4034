//! # Python 脚本生成工具
//!
//! 生成一段可复现当前过滤结果的 Python 脚本
//! （`h_transport_materials` + `matplotlib`）。
//!
//! ## 依赖关系
//! - 被 `dashboard/session.rs`, `commands/export.rs` 使用
//! - 使用 `models/` 的 PropertyKind, FilterSelection

use crate::models::{FilterSelection, PropertyKind};

/// 脚本下载时的文件名
pub const SCRIPT_FILENAME: &str = "script.py";

/// Python 列表字面量，例如 `['tungsten', 'copper']`
fn py_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<String> = items
        .into_iter()
        .map(|s| format!("'{}'", s.as_ref().replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// 生成 Python 脚本内容
///
/// 材料、作者和同位素全部转为小写；年份范围两端都包含。
pub fn generate_python_script(kind: PropertyKind, selection: &FilterSelection) -> String {
    let materials = py_list(selection.materials.iter().map(|m| m.to_lowercase()));
    let authors = py_list(selection.authors.iter().map(|a| a.to_lowercase()));
    let isotopes = py_list(selection.isotopes.iter().map(|i| i.symbol().to_lowercase()));

    let year_filter = match selection.years {
        Some(years) => format!(
            "\n    .filter(year=np.arange({}, {} + 1, step=1).tolist())",
            years.min, years.max
        ),
        None => String::new(),
    };

    format!(
        r#"import h_transport_materials as htm
import matplotlib.pyplot as plt
import numpy as np

filtered_{group} = (
    {database}.filter(material={materials})
    .filter(author={authors})
    .filter(isotope={isotopes}){year_filter}
)

htm.plotting.plot(filtered_{group})

plt.legend()
plt.xlabel("1/T (K$^{{-1}}$)")
plt.yscale("log")
plt.show()
"#,
        group = kind.name(),
        database = kind.database_expr(),
        materials = materials,
        authors = authors,
        isotopes = isotopes,
        year_filter = year_filter,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Isotope, YearRange};

    fn selection() -> FilterSelection {
        FilterSelection::new(
            vec!["Tungsten".to_string()],
            vec![Isotope::H, Isotope::D],
            vec!["Frauenfelder".to_string(), "heinola".to_string()],
            Some(YearRange::new(1960, 2010).unwrap()),
        )
    }

    #[test]
    fn test_script_lowercases_facets() {
        let script = generate_python_script(PropertyKind::Diffusivity, &selection());
        assert!(script.contains("htm.diffusivities.filter(material=['tungsten'])"));
        assert!(script.contains(".filter(author=['frauenfelder', 'heinola'])"));
        assert!(script.contains(".filter(isotope=['h', 'd'])"));
        assert!(script.contains("filtered_diffusivity = ("));
        assert!(script.contains("htm.plotting.plot(filtered_diffusivity)"));
    }

    #[test]
    fn test_script_year_range_is_inclusive() {
        let script = generate_python_script(PropertyKind::Solubility, &selection());
        assert!(script.contains("np.arange(1960, 2010 + 1, step=1)"));
        assert!(script.contains("htm.solubilities"));
        assert!(script.contains(r#"plt.xlabel("1/T (K$^{-1}$)")"#));
    }

    #[test]
    fn test_script_without_years_has_no_year_filter() {
        let mut sel = selection();
        sel.years = None;
        let script = generate_python_script(PropertyKind::RecombinationCoeff, &sel);
        assert!(!script.contains("filter(year="));
        assert!(script.contains("htm.recombination_coeffs"));
    }

    #[test]
    fn test_py_list_escapes_quotes() {
        assert_eq!(py_list(["o'brien"]), r"['o\'brien']");
        assert_eq!(py_list(Vec::<String>::new()), "[]");
    }
}
