//! Rendering adapters: text table, HTML rows and JSON.
//!
//! The statistical core hands over raw `f64`s; rounding, decimal marks and
//! label language are decided here from a [`RenderConfig`].
//!
//! # Examples
//!
//! ```
//! use u_normality::config::RenderConfig;
//! use u_normality::render;
//! use u_normality::report::analyze;
//!
//! let report = analyze("15.2, 16.1, 14.8, 17.3, 16.5, 15.9, 18.2, 16.8, 15.5, 17.0").unwrap();
//! let text = render::text(&report, &RenderConfig::default());
//! assert!(text.contains("Média"));
//! assert!(text.contains("16,3300000"));
//! ```

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{DecimalMark, Language, RenderConfig};
use crate::distribution::{HistogramBins, KdeResult, QqPlot};
use crate::error::AnalysisError;
use crate::report::{AnalysisResult, Report};
use crate::sample::ValidationError;
use crate::verdict::{percent, Verdict};

/// Formats `value` with a fixed number of decimals and the chosen mark.
///
/// ```
/// use u_normality::config::DecimalMark;
/// use u_normality::render::format_number;
///
/// assert_eq!(format_number(0.1234567, 4, DecimalMark::Comma), "0,1235");
/// assert_eq!(format_number(-2.5, 2, DecimalMark::Point), "-2.50");
/// ```
pub fn format_number(value: f64, places: usize, mark: DecimalMark) -> String {
    let s = format!("{value:.places$}");
    match mark {
        DecimalMark::Point => s,
        DecimalMark::Comma => s.replace('.', &mark.as_char().to_string()),
    }
}

struct Labels {
    title: &'static str,
    mean: &'static str,
    std_dev: &'static str,
    count: &'static str,
    w: &'static str,
    p_value: &'static str,
    conclusion: &'static str,
    accepted: &'static str,
    rejected: &'static str,
    risk: &'static str,
}

const PT: Labels = Labels {
    title: "Teste de Normalidade (Método SHAPIRO-WILK)",
    mean: "Média",
    std_dev: "Desvio padrão",
    count: "Observações",
    w: "W",
    p_value: "Valor-P",
    conclusion: "CONCLUSÃO",
    accepted: "A normalidade é aceita",
    rejected: "A normalidade é rejeitada",
    risk: "com um risco alfa de",
};

const EN: Labels = Labels {
    title: "Normality Test (SHAPIRO-WILK method)",
    mean: "Mean",
    std_dev: "Standard deviation",
    count: "Observations",
    w: "W",
    p_value: "P-value",
    conclusion: "CONCLUSION",
    accepted: "Normality is accepted",
    rejected: "Normality is rejected",
    risk: "at an alpha risk of",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Portuguese => &PT,
        Language::English => &EN,
    }
}

/// Label/value pairs in display order.
fn rows(result: &AnalysisResult, config: &RenderConfig) -> Vec<(&'static str, String)> {
    let l = labels(config.language);
    let p = &config.precision;
    let mark = config.decimal_mark;
    vec![
        (l.mean, format_number(result.mean, p.mean, mark)),
        (l.std_dev, format_number(result.std_dev, p.std_dev, mark)),
        (l.count, result.count.to_string()),
        (l.w, format_number(result.w, p.w, mark)),
        (l.p_value, format_number(result.p_value, p.p_value, mark)),
    ]
}

/// The conclusion line, e.g.
/// "CONCLUSÃO: A normalidade é aceita com um risco alfa de 5%".
pub fn conclusion(result: &AnalysisResult, language: Language) -> String {
    let l = labels(language);
    let outcome = match result.verdict {
        Verdict::Normal => l.accepted,
        Verdict::NotNormal => l.rejected,
    };
    format!(
        "{}: {} {} {}%",
        l.conclusion,
        outcome,
        l.risk,
        percent(result.alpha)
    )
}

/// Plain-text report: title, aligned table, conclusion and, if
/// configured, the chart data.
pub fn text(report: &Report, config: &RenderConfig) -> String {
    let l = labels(config.language);
    let rows = rows(&report.result, config);
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{}", l.title);
    let _ = writeln!(out, "{}", "-".repeat(l.title.chars().count()));
    for (label, value) in &rows {
        let pad = width - label.chars().count();
        let _ = writeln!(out, "{label}{}  {value}", " ".repeat(pad));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", conclusion(&report.result, config.language));

    if config.show_chart_data {
        let data = ChartData::from_report(report);
        let _ = writeln!(out);
        write_chart_data(&mut out, &data, config.decimal_mark);
    }
    out
}

fn write_chart_data(out: &mut String, data: &ChartData, mark: DecimalMark) {
    let f = |v: f64| format_number(v, 4, mark);

    if let Some(bins) = &data.histogram {
        let _ = writeln!(out, "Histogram ({} bins)", bins.n_bins);
        for (i, count) in bins.counts.iter().enumerate() {
            let close = if i + 1 == bins.n_bins { ']' } else { ')' };
            let _ = writeln!(
                out,
                "  [{}; {}{}  {}",
                f(bins.edges[i]),
                f(bins.edges[i + 1]),
                close,
                count
            );
        }
    }
    if let Some(kde) = &data.density {
        let _ = writeln!(
            out,
            "Density overlay: {} points, bandwidth {}",
            kde.x.len(),
            f(kde.bandwidth)
        );
    }
    if let Some(qq) = &data.qq {
        let _ = writeln!(
            out,
            "Q-Q plot: slope {}, intercept {}, r {}",
            f(qq.slope),
            f(qq.intercept),
            f(qq.r)
        );
        for (t, s) in qq.theoretical.iter().zip(&qq.sample) {
            let _ = writeln!(out, "  {}  {}", f(*t), f(*s));
        }
    }
}

/// HTML rows for a web page: one flex row per
/// statistic, then a colored conclusion.
pub fn html(report: &Report, config: &RenderConfig) -> String {
    let mut out = String::new();
    let l = labels(config.language);
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(l.title));
    let _ = writeln!(out, "<div class=\"report-table\">");
    for (label, value) in rows(&report.result, config) {
        let _ = writeln!(
            out,
            "  <div style=\"display: flex; border-bottom: 1px solid #f0f2f6; padding: 5px 0;\">\
             <div class=\"report-label\" style=\"width: 200px; font-weight: bold;\">{}</div>\
             <div class=\"report-value\">{}</div></div>",
            escape_html(label),
            escape_html(&value)
        );
    }
    let _ = writeln!(out, "</div>");
    let color = if report.result.verdict.is_normal() {
        "#2e7d32"
    } else {
        "#c62828"
    };
    let _ = writeln!(
        out,
        "<div class=\"conclusion-box\" style=\"color: {color}; font-weight: bold; margin-top: 15px;\">{}</div>",
        escape_html(&conclusion(&report.result, config.language))
    );
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Materialized chart data for both charts of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Histogram bars.
    pub histogram: Option<HistogramBins>,
    /// Density overlay.
    pub density: Option<KdeResult>,
    /// Q-Q points and reference line.
    pub qq: Option<QqPlot>,
}

impl ChartData {
    /// Computes the data both chart specs of `report` describe.
    pub fn from_report(report: &Report) -> Self {
        Self {
            histogram: report.histogram.histogram_bins(),
            density: report.histogram.density(),
            qq: report.qq_plot.qq_points(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a Report,
    justification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart_data: Option<ChartData>,
}

/// Pretty-printed JSON of the report with full-precision numbers.
pub fn json(report: &Report, include_chart_data: bool) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        report,
        justification: report.result.justification(),
        chart_data: include_chart_data.then(|| ChartData::from_report(report)),
    })
}

/// User-facing message for a failed analysis.
pub fn error_message(err: &AnalysisError, language: Language) -> String {
    match (err, language) {
        (AnalysisError::Validation(ValidationError::Parse(f)), Language::Portuguese) => format!(
            "Erro: Insira apenas números válidos ('{}' na posição {}).",
            f.token, f.position
        ),
        (AnalysisError::Validation(ValidationError::Parse(f)), Language::English) => format!(
            "Error: insert only valid numbers ('{}' at position {}).",
            f.token, f.position
        ),
        (AnalysisError::Validation(ValidationError::Empty), Language::Portuguese) => {
            "Erro: Nenhum dado válido foi inserido.".to_string()
        }
        (AnalysisError::Validation(ValidationError::Empty), Language::English) => {
            "Error: no valid data was entered.".to_string()
        }
        (
            AnalysisError::Validation(ValidationError::OutOfRange { count, min, max }),
            Language::Portuguese,
        ) => format!(
            "Erro: O número de dados fornecido ({count}) está fora do intervalo permitido ({min} a {max})."
        ),
        (
            AnalysisError::Validation(ValidationError::OutOfRange { count, min, max }),
            Language::English,
        ) => format!(
            "Error: the number of values provided ({count}) is outside the permitted range ({min} to {max})."
        ),
        (other, Language::Portuguese) => format!("Ocorreu um erro: {other}"),
        (other, Language::English) => format!("An error occurred: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::analyze;

    const TEN: &str = "15.2, 16.1, 14.8, 17.3, 16.5, 15.9, 18.2, 16.8, 15.5, 17.0";

    fn english() -> RenderConfig {
        RenderConfig {
            language: Language::English,
            decimal_mark: DecimalMark::Point,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(16.2866666667, 7, DecimalMark::Comma), "16,2866667");
        assert_eq!(format_number(16.2866666667, 7, DecimalMark::Point), "16.2866667");
        assert_eq!(format_number(3.0, 0, DecimalMark::Comma), "3");
    }

    #[test]
    fn text_portuguese_defaults() {
        let report = analyze(TEN).expect("analysis");
        let out = text(&report, &RenderConfig::default());
        assert!(out.contains("Teste de Normalidade"));
        assert!(out.contains("Desvio padrão"));
        assert!(out.contains("Observações"));
        assert!(out.contains("Valor-P"));
        assert!(out.contains("CONCLUSÃO: A normalidade é aceita com um risco alfa de 5%"));
        assert!(!out.contains("Histogram"));
    }

    #[test]
    fn text_english_point() {
        let report = analyze(TEN).expect("analysis");
        let out = text(&report, &english());
        assert!(out.contains("Mean"));
        assert!(out.contains("16.3300000"), "{out}");
        assert!(out.contains("Observations        10"), "{out}");
        assert!(out.contains("CONCLUSION: Normality is accepted at an alpha risk of 5%"));
    }

    #[test]
    fn text_with_chart_data() {
        let report = analyze(TEN).expect("analysis");
        let config = RenderConfig {
            show_chart_data: true,
            ..english()
        };
        let out = text(&report, &config);
        assert!(out.contains("Histogram ("), "{out}");
        assert!(out.contains("Density overlay: 200 points"), "{out}");
        assert!(out.contains("Q-Q plot: slope"), "{out}");
    }

    #[test]
    fn rejected_conclusion() {
        let raw = "1\n1,1\n1,2\n1,3\n1,4\n1,5\n1,6\n1,7\n1,8\n1,9\n\
                   8\n8,1\n8,2\n8,3\n8,4\n8,5\n8,6\n8,7\n8,8\n8,9";
        let report = analyze(raw).expect("analysis");
        let pt = conclusion(&report.result, Language::Portuguese);
        assert_eq!(pt, "CONCLUSÃO: A normalidade é rejeitada com um risco alfa de 5%");
        let h = html(&report, &RenderConfig::default());
        assert!(h.contains("#c62828"));
    }

    #[test]
    fn html_rows() {
        let report = analyze(TEN).expect("analysis");
        let h = html(&report, &RenderConfig::default());
        assert_eq!(h.matches("report-label").count(), 5);
        assert!(h.contains("#2e7d32"));
        assert!(h.contains("Média"));
    }

    #[test]
    fn escape() {
        assert_eq!(escape_html("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }

    #[test]
    fn json_full_precision() {
        let report = analyze(TEN).expect("analysis");
        let s = json(&report, false).expect("json");
        let v: serde_json::Value = serde_json::from_str(&s).expect("valid json");
        assert_eq!(v["result"]["count"], 10);
        assert_eq!(v["result"]["alpha"], 0.05);
        assert_eq!(v["result"]["mean"].as_f64(), Some(report.result.mean));
        assert!(v["justification"].as_str().expect("string").contains("accepted"));
        assert!(v.get("chart_data").is_none());

        let with_data = json(&report, true).expect("json");
        let v: serde_json::Value = serde_json::from_str(&with_data).expect("valid json");
        assert!(v["chart_data"]["histogram"]["counts"].is_array());
        assert!(v["chart_data"]["qq"]["theoretical"].is_array());
    }

    #[test]
    fn error_messages() {
        let parse = analyze("1.0, x").expect_err("bad token");
        assert_eq!(
            error_message(&parse, Language::Portuguese),
            "Erro: Insira apenas números válidos ('x' na posição 2)."
        );
        let empty = analyze("").expect_err("empty");
        assert_eq!(
            error_message(&empty, Language::English),
            "Error: no valid data was entered."
        );
        let range = analyze("1\n2\n3").expect_err("too few");
        assert_eq!(
            error_message(&range, Language::Portuguese),
            "Erro: O número de dados fornecido (3) está fora do intervalo permitido (10 a 30)."
        );
        let computation = AnalysisError::Computation("W undefined".into());
        assert_eq!(
            error_message(&computation, Language::English),
            "An error occurred: computation failed: W undefined"
        );
    }
}
