//! Stylesheet for rendered analysis documents.

/// CSS for the report body, tool cards, process map and sources list.
///
/// The tool grid switches to two columns at 768px.
pub const STYLESHEET: &str = r"
:root { color-scheme: dark; }
body { margin: 0; background: #0f172a; color: #cbd5e1; font: 16px/1.6 system-ui, -apple-system, 'Segoe UI', sans-serif; }
.analysis { max-width: 960px; margin: 2rem auto; padding: 1.5rem; background: rgba(30, 41, 59, 0.5); border: 1px solid #334155; border-radius: 0.5rem; }
.analysis h1, .analysis h2 { color: #67e8f9; }
.analysis h2 { font-size: 1.5rem; margin-bottom: 1.5rem; }
.analysis strong { color: #f1f5f9; }
.analysis hr { margin: 2.5rem 0; border: 0; border-top: 1px solid #475569; }
.analysis blockquote { margin: 1rem 0; padding-left: 1rem; border-left: 4px solid #06b6d4; color: #cbd5e1; }
.analysis li::marker { color: #22d3ee; }
.analysis code { background: #334155; border-radius: 0.25rem; padding: 0 0.25rem; font-size: 0.875rem; }
.analysis pre { background: #020617; border-radius: 0.375rem; padding: 0.75rem; overflow-x: auto; }
.analysis pre code { background: none; padding: 0; }
.analysis table { width: 100%; margin: 1.5rem 0; border-collapse: collapse; }
.analysis thead { background: rgba(51, 65, 85, 0.5); }
.analysis th { border: 1px solid #64748b; padding: 0.5rem 1rem; text-align: left; color: #e2e8f0; }
.analysis td { border: 1px solid #475569; padding: 0.75rem 1rem; vertical-align: top; color: #94a3b8; }
.tool-grid { display: grid; grid-template-columns: 1fr; gap: 1.5rem; margin: 1.5rem 0; }
@media (min-width: 768px) { .tool-grid { grid-template-columns: repeat(2, 1fr); } }
.tool-card { display: flex; flex-direction: column; padding: 1.5rem; background: rgba(51, 65, 85, 0.5); border: 1px solid #475569; border-radius: 0.5rem; }
.tool-card-title { display: flex; align-items: center; gap: 0.75rem; margin: 0 0 0.5rem; font-size: 1.25rem; color: #f1f5f9; }
.tool-card-icon { color: #22d3ee; flex-shrink: 0; }
.tool-card-summary { flex-grow: 1; margin: 0 0 1.5rem; font-size: 0.875rem; }
.tool-card-metrics { display: grid; gap: 1rem; font-size: 0.875rem; }
.tool-metric { display: flex; align-items: center; gap: 0.75rem; }
.tool-metric-icon { color: #94a3b8; flex-shrink: 0; }
.tool-metric-label { font-weight: 600; color: #e2e8f0; }
.process-map { margin: 1rem 0; }
.process-map-toggle { display: flex; align-items: center; gap: 0.5rem; cursor: pointer; list-style: none; padding: 0.5rem 0; font-weight: 600; }
.process-map-toggle::-webkit-details-marker { display: none; }
.process-map[open] .process-map-chevron { transform: rotate(180deg); }
.process-map-graph { display: flex; justify-content: center; align-items: center; min-height: 200px; margin: 1rem 0; padding: 1rem; background: #0f172a; border-radius: 0.5rem; }
.process-map-graph svg { max-width: 100%; height: auto; }
.process-map-error { width: 100%; padding: 1rem; color: #f87171; border: 1px solid #dc2626; background: rgba(127, 29, 29, 0.2); border-radius: 0.5rem; }
.process-map-error-title { font-weight: 700; margin: 0 0 0.5rem; }
.process-map-error-detail { font-size: 0.875rem; margin: 0 0 0.5rem; }
.process-map-error pre { font-size: 0.75rem; color: #cbd5e1; }
.sources { margin-top: 1.5rem; padding-top: 1.5rem; border-top: 1px solid #334155; }
.sources h4 { margin: 0 0 0.75rem; font-size: 1.125rem; color: #cbd5e1; }
.sources ul { list-style: none; margin: 0; padding: 0; }
.sources li { margin: 0.5rem 0; }
.sources a { color: #22d3ee; font-size: 0.875rem; word-break: break-all; }
";
