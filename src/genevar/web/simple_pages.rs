// The lookup form served at "/".  It posts to /get_gene_info and renders
// the JSON response in the page.

const PAGE_TITLE: &str = "Gene Information Lookup";

const PAGE_STYLE: &str = r##"
    body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
    .container { background: #f9f9f9; padding: 30px; border-radius: 8px; }
    input, button { padding: 10px; margin: 5px; border: 1px solid #ddd; border-radius: 4px; }
    button { background: #007cba; color: white; cursor: pointer; }
    .results { margin-top: 20px; padding: 20px; background: white; border-radius: 4px; }
    textarea { width: 100%; height: 100px; font-family: monospace; }
    .error { color: red; padding: 10px; background: #ffe6e6; border-radius: 4px; }
"##;

const PAGE_SCRIPT: &str = r##"
  function escapeHtml(text) {
    const div = document.createElement('div');
    div.textContent = text == null ? '' : String(text);
    return div.innerHTML;
  }

  function sequenceBox(title, seq) {
    if (!seq) {
      return '';
    }
    return '<h4>' + title + '</h4><textarea readonly>' + escapeHtml(seq) + '</textarea>';
  }

  function displayResults(data) {
    const results = document.getElementById('results');
    if (data.error) {
      results.innerHTML = '<div class="error">' + escapeHtml(data.error) + '</div>';
    } else {
      const links = data.external_links;
      results.innerHTML =
        '<h2>' + escapeHtml(data.gene_name) + '</h2>' +
        (data.variant ? '<p><strong>Variant:</strong> ' + escapeHtml(data.variant) + '</p>' : '') +
        '<h3>Description</h3><p>' + escapeHtml(data.description) + '</p>' +
        '<h3>Phenotype</h3><p>' + escapeHtml(data.phenotype) + '</p>' +
        '<h3>External Links</h3><ul>' +
        '<li><a href="' + escapeHtml(links.omim) + '" target="_blank">OMIM</a></li>' +
        '<li><a href="' + escapeHtml(links.uniprot) + '" target="_blank">UniProt</a></li>' +
        '<li><a href="' + escapeHtml(links.pdb) + '" target="_blank">Protein Data Bank</a></li>' +
        '<li><a href="' + escapeHtml(links.alphamissense) + '" target="_blank">AlphaMissense</a></li>' +
        '</ul>' +
        sequenceBox('Wild-type protein sequence', data.wild_type_sequence) +
        sequenceBox('Variant', data.variant_sequence);
    }
    results.style.display = 'block';
  }

  document.getElementById('gene-form').addEventListener('submit', function(e) {
    e.preventDefault();
    const gene = document.getElementById('gene-input').value;
    const variant = document.getElementById('variant-input').value;

    fetch('/get_gene_info', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ gene: gene, variant: variant || null }),
    })
      .then(response => response.json())
      .then(displayResults)
      .catch(error => displayResults({ error: 'Error: ' + error.message }));
  });
"##;

pub fn render_index_page() -> String {
    format!(r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{}</title>
  <style>{}</style>
</head>
<body>
  <div class="container">
    <h1>{}</h1>
    <form id="gene-form">
      <input type="text" id="gene-input" placeholder="Gene name (e.g. BRCA1, MSH2, TP53)" required>
      <input type="text" id="variant-input" placeholder="Variant (e.g. A123G, optional)">
      <button type="submit">Get Gene Info</button>
    </form>
    <div id="results" class="results" style="display: none;"></div>
  </div>
  <script>{}</script>
</body>
</html>
"##, PAGE_TITLE, PAGE_STYLE, PAGE_TITLE, PAGE_SCRIPT)
}
