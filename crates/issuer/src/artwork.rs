//! Certificate artwork rendering
//!
//! Produces the vector certificate as an SVG string: completion facts as
//! text, plus a scannable QR code encoding the public verification URL.
//! The QR is emitted as plain rects from the module matrix, so the output
//! is a single self-contained SVG document.

use qrcode::{Color, QrCode};

use certmint_common::{CertificateRequest, Error, Result};

const WIDTH: u32 = 860;
const HEIGHT: u32 = 620;
const QR_SIZE: u32 = 140;

/// Render the certificate image for one completion
pub fn render_certificate_svg(request: &CertificateRequest, verify_url: &str) -> Result<String> {
    let code = QrCode::new(verify_url.as_bytes())
        .map_err(|e| Error::Configuration(format!("verification URL does not fit a QR code: {e}")))?;
    let qr = render_qr_group(&code, WIDTH - QR_SIZE - 60, HEIGHT - QR_SIZE - 60, QR_SIZE);

    let learner = escape_xml(&request.learner_name);
    let course = escape_xml(&request.course_name);
    let number = escape_xml(&request.certificate_number);
    let date = request.completion_date.format("%B %-d, %Y");

    Ok(format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
  <rect width="{WIDTH}" height="{HEIGHT}" fill="#0b1220"/>
  <rect x="16" y="16" width="{inner_w}" height="{inner_h}" fill="none" stroke="#7c5cff" stroke-width="3" rx="12"/>
  <text x="{cx}" y="110" text-anchor="middle" fill="#e8e6ff" font-family="Georgia, serif" font-size="40">Certificate of Completion</text>
  <text x="{cx}" y="170" text-anchor="middle" fill="#9aa3b5" font-family="Georgia, serif" font-size="18">This certifies that</text>
  <text x="{cx}" y="235" text-anchor="middle" fill="#ffffff" font-family="Georgia, serif" font-size="46">{learner}</text>
  <text x="{cx}" y="295" text-anchor="middle" fill="#9aa3b5" font-family="Georgia, serif" font-size="18">has successfully completed</text>
  <text x="{cx}" y="350" text-anchor="middle" fill="#c9bfff" font-family="Georgia, serif" font-size="30">{course}</text>
  <text x="{cx}" y="405" text-anchor="middle" fill="#9aa3b5" font-family="Georgia, serif" font-size="18">on {date}</text>
  <text x="60" y="{footer_y}" fill="#6b7280" font-family="monospace" font-size="14">Certificate No. {number}</text>
  <text x="60" y="{footer_y2}" fill="#6b7280" font-family="monospace" font-size="12">Scan to verify on ledger</text>
{qr}
</svg>
"##,
        inner_w = WIDTH - 32,
        inner_h = HEIGHT - 32,
        cx = WIDTH / 2,
        footer_y = HEIGHT - 80,
        footer_y2 = HEIGHT - 56,
    ))
}

/// Emit the QR module matrix as a `<g>` of dark-module rects, scaled into a
/// `size`-pixel square at (x, y) on a white quiet zone.
fn render_qr_group(code: &QrCode, x: u32, y: u32, size: u32) -> String {
    let modules = code.width() as u32;
    // Two-module quiet zone on each side
    let scale = size as f32 / (modules + 4) as f32;
    let offset = 2.0 * scale;

    let mut out = String::new();
    out.push_str(&format!(
        "  <g transform=\"translate({x},{y})\">\n    <rect width=\"{size}\" height=\"{size}\" fill=\"#ffffff\" rx=\"6\"/>\n"
    ));
    for (idx, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            let row = idx as u32 / modules;
            let col = idx as u32 % modules;
            out.push_str(&format!(
                "    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"#000000\"/>\n",
                offset + col as f32 * scale,
                offset + row as f32 * scale,
                scale,
                scale
            ));
        }
    }
    out.push_str("  </g>");
    out
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> CertificateRequest {
        CertificateRequest {
            course_id: "hedera-101".into(),
            course_name: "Hedera Fundamentals".into(),
            learner_name: "Amina Yusuf".into(),
            learner_account: "0.0.1001".parse().unwrap(),
            completion_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            certificate_number: "WEB3V-2025-00042".into(),
        }
    }

    #[test]
    fn test_svg_embeds_completion_facts() {
        let svg = render_certificate_svg(&sample(), "https://web3versity.app/verify/WEB3V-2025-00042")
            .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Amina Yusuf"));
        assert!(svg.contains("Hedera Fundamentals"));
        assert!(svg.contains("WEB3V-2025-00042"));
        assert!(svg.contains("January 10, 2025"));
    }

    #[test]
    fn test_names_are_xml_escaped() {
        let mut request = sample();
        request.learner_name = "O'Neill <Dev & Ops>".into();
        let svg = render_certificate_svg(&request, "https://web3versity.app/verify/X").unwrap();
        assert!(svg.contains("O&apos;Neill &lt;Dev &amp; Ops&gt;"));
        assert!(!svg.contains("<Dev"));
    }

    #[test]
    fn test_qr_modules_present() {
        let svg = render_certificate_svg(&sample(), "https://web3versity.app/verify/WEB3V-2025-00042")
            .unwrap();
        // A QR for a URL this long has hundreds of dark modules
        assert!(svg.matches("fill=\"#000000\"").count() > 100);
    }
}
