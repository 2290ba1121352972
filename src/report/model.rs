//! Monthly sales figures and their table rows.

use crate::foundation::error::{PosterError, PosterResult};

pub const DEFAULT_COMPANY: &str = "TechVision株式会社";

fn default_company() -> String {
    DEFAULT_COMPANY.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Department {
    pub name: String,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Product {
    pub name: String,
    pub dept: String,
    pub amount: u64,
}

/// Sales totals for one month.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportData {
    pub total: u64,
    /// Free-form change versus the previous month, e.g. `+8.3%（12月比）`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_diff: Option<String>,
    pub departments: Vec<Department>,
    #[serde(default)]
    pub top_products: Vec<Product>,
    #[serde(default = "default_company")]
    pub company: String,
}

impl ReportData {
    pub fn validate(&self) -> PosterResult<()> {
        if self.total == 0 {
            return Err(PosterError::validation("report total must be > 0"));
        }
        if self.departments.is_empty() {
            return Err(PosterError::validation(
                "report needs at least one department",
            ));
        }
        let sum: u64 = self.departments.iter().map(|d| d.amount).sum();
        if sum != self.total {
            tracing::warn!(
                total = self.total,
                departments = sum,
                "department amounts do not add up to the total"
            );
        }
        Ok(())
    }

    /// `[name, amount, share]` per department, then the `合計` row.
    pub fn department_rows(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = self
            .departments
            .iter()
            .map(|d| {
                let share = d.amount as f64 / self.total as f64 * 100.0;
                vec![d.name.clone(), format_yen(d.amount), format!("{share:.1}%")]
            })
            .collect();
        rows.push(vec![
            "合計".to_string(),
            format_yen(self.total),
            "100.0%".to_string(),
        ]);
        rows
    }

    /// `[rank, name, department, amount]` per product, ranked from 1.
    pub fn product_rows(&self) -> Vec<Vec<String>> {
        self.top_products
            .iter()
            .enumerate()
            .map(|(i, p)| {
                vec![
                    (i + 1).to_string(),
                    p.name.clone(),
                    p.dept.clone(),
                    format_yen(p.amount),
                ]
            })
            .collect()
    }
}

/// One month's report: labels plus figures.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlyReport {
    /// Short month name used in body text, e.g. `1月`.
    pub month_label: String,
    /// Period shown in the title, e.g. `2025年1月`.
    pub year_month: String,
    #[serde(flatten)]
    pub data: ReportData,
}

impl MonthlyReport {
    pub fn title(&self) -> String {
        format!("{} 売上レポート", self.year_month)
    }

    pub fn from_json_path(path: impl AsRef<std::path::Path>) -> PosterResult<Self> {
        let report: Self = crate::config::from_path(path, "report data")?;
        report.data.validate()?;
        Ok(report)
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `98200000` -> `"98,200,000円"`.
pub fn format_yen(n: u64) -> String {
    format!("{}円", group_thousands(n))
}

/// Built-in sample months.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SampleMonth {
    Jan,
    Feb,
}

impl SampleMonth {
    pub const ALL: [SampleMonth; 2] = [SampleMonth::Jan, SampleMonth::Feb];

    pub fn report(self) -> MonthlyReport {
        match self {
            Self::Jan => january(),
            Self::Feb => february(),
        }
    }

    /// Default output file name, `report_01.pdf` for January.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Jan => "report_01.pdf",
            Self::Feb => "report_02.pdf",
        }
    }
}

fn dept(name: &str, amount: u64) -> Department {
    Department {
        name: name.to_string(),
        amount,
    }
}

fn product(name: &str, dept: &str, amount: u64) -> Product {
    Product {
        name: name.to_string(),
        dept: dept.to_string(),
        amount,
    }
}

const CONSUMER: &str = "コンシューマー事業部";
const ENTERPRISE: &str = "エンタープライズ事業部";
const CLOUD: &str = "クラウドサービス事業部";
const DEVICE: &str = "デバイス事業部";

pub fn january() -> MonthlyReport {
    MonthlyReport {
        month_label: "1月".into(),
        year_month: "2025年1月".into(),
        data: ReportData {
            total: 287_450_000,
            prev_diff: Some("+8.3%（12月比）".into()),
            departments: vec![
                dept(CONSUMER, 98_200_000),
                dept(ENTERPRISE, 82_500_000),
                dept(CLOUD, 67_350_000),
                dept(DEVICE, 39_400_000),
            ],
            top_products: vec![
                product("クラウドERP Standard", ENTERPRISE, 32_800_000),
                product("スマートウォッチ Pro", CONSUMER, 27_150_000),
                product("AI分析プラットフォーム", CLOUD, 24_600_000),
                product("ワイヤレスイヤホン Elite", CONSUMER, 21_900_000),
                product("セキュリティGateway X1", ENTERPRISE, 18_750_000),
            ],
            company: default_company(),
        },
    }
}

pub fn february() -> MonthlyReport {
    MonthlyReport {
        month_label: "2月".into(),
        year_month: "2025年2月".into(),
        data: ReportData {
            total: 312_800_000,
            prev_diff: Some("+8.8%（1月比）".into()),
            departments: vec![
                dept(CONSUMER, 105_600_000),
                dept(ENTERPRISE, 91_200_000),
                dept(CLOUD, 72_400_000),
                dept(DEVICE, 43_600_000),
            ],
            top_products: vec![
                product("クラウドERP Standard", ENTERPRISE, 36_400_000),
                product("AI分析プラットフォーム", CLOUD, 28_900_000),
                product("スマートウォッチ Pro", CONSUMER, 28_200_000),
                product("ワイヤレスイヤホン Elite", CONSUMER, 24_300_000),
                product("統合監視ダッシュボード", CLOUD, 19_800_000),
            ],
            company: default_company(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(format_yen(287_450_000), "287,450,000円");
    }

    #[test]
    fn department_table_ends_with_the_total_row() {
        let rows = january().data.department_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec!["コンシューマー事業部", "98,200,000円", "34.2%"]);
        assert_eq!(rows[4], vec!["合計", "287,450,000円", "100.0%"]);
    }

    #[test]
    fn samples_add_up() {
        for month in SampleMonth::ALL {
            let r = month.report();
            r.data.validate().unwrap();
            let sum: u64 = r.data.departments.iter().map(|d| d.amount).sum();
            assert_eq!(sum, r.data.total);
        }
    }

    #[test]
    fn products_are_ranked_from_one() {
        let rows = february().data.product_rows();
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[4], vec!["5", "統合監視ダッシュボード", CLOUD, "19,800,000円"]);
    }

    #[test]
    fn empty_departments_are_rejected() {
        let mut data = january().data;
        data.departments.clear();
        assert!(matches!(data.validate(), Err(PosterError::Validation(_))));
    }

    #[test]
    fn json_without_company_uses_the_default() {
        let json = r#"{
            "month_label": "3月",
            "year_month": "2025年3月",
            "total": 100,
            "departments": [{"name": "A", "amount": 100}]
        }"#;
        let r: MonthlyReport = crate::config::from_reader(json.as_bytes(), "report data").unwrap();
        assert_eq!(r.data.company, DEFAULT_COMPANY);
        assert!(r.data.prev_diff.is_none());
        assert_eq!(r.title(), "2025年3月 売上レポート");
    }
}
