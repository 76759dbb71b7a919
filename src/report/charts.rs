use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Write a self-contained HTML chart artifact. The aggregate dataset is
/// embedded as JSON and rendered client-side by plotly.js, so the file
/// opens without any server.
pub fn write_chart(path: &Path, title: &str, data: &Value, layout: &Value) -> Result<()> {
    let html = render_html(title, data, layout)?;
    fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn render_html(title: &str, data: &Value, layout: &Value) -> Result<String> {
    let data = serde_json::to_string(data)?;
    let layout = serde_json::to_string(layout)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
</head>
<body>
<div id="chart" style="width:100%;height:100vh;"></div>
<script>
Plotly.newPlot("chart", {data}, {layout}, {{responsive: true}});
</script>
</body>
</html>
"#
    ))
}
