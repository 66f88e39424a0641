pub fn render_index(visited: usize, total: usize) -> String {
    INDEX_HTML
        .replace("{{VISITED}}", &visited.to_string())
        .replace("{{TOTAL}}", &total.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pool Passport</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #e8f4f8;
      --bg-2: #a7d8f5;
      --ink: #1f2b33;
      --accent: #ff6b4a;
      --accent-2: #1d4e6b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(29, 78, 107, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #d9eef7 60%, #f2f9fc 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .badge {
      background: var(--accent-2);
      color: white;
      border-radius: 999px;
      padding: 6px 14px;
      font-weight: 600;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button:disabled {
      opacity: 0.4;
      cursor: default;
    }

    .view {
      display: none;
      gap: 16px;
    }

    .view.active {
      display: grid;
    }

    .pool-item {
      background: white;
      border-radius: 18px;
      padding: 18px;
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .pool-name {
      font-size: 1.3rem;
      font-weight: 600;
    }

    .stamp-chip.cta {
      background: var(--accent);
    }

    .stamp-chip.stamped {
      background: #2d7a4b;
    }

    .nav {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    #map {
      height: 320px;
      border-radius: 18px;
    }

    body.full-map #map {
      height: 70vh;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .passport {
      background: white;
      border-radius: 18px;
      padding: 16px;
      display: grid;
      gap: 8px;
      text-align: center;
    }

    .passport img {
      width: 120px;
      height: 120px;
      object-fit: contain;
      margin: 0 auto;
    }

    .stamp.pop {
      animation: pop 400ms ease;
    }

    .stamp-date {
      color: #5f6b73;
      cursor: pointer;
      min-height: 1.2em;
    }

    .pager {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .status {
      min-height: 1.2em;
      color: #5f6b73;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @keyframes pop {
      from { transform: scale(1.3); }
      to { transform: scale(1); }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Pool Passport</h1>
      <span class="badge" id="countBadge">{{VISITED}} / {{TOTAL}}</span>
      <div class="nav">
        <button id="toggleBtn" type="button">Stamps</button>
        <button id="mapToggle" type="button" aria-pressed="false">Full Map</button>
        <button id="resetBtn" type="button">Reset</button>
      </div>
    </header>

    <section class="view active" id="listView">
      <div id="poolList"></div>
      <div class="nav">
        <button id="btnPrevPool" type="button">Previous</button>
        <button id="btnNextPool" type="button">Next</button>
        <a id="openNativeMap" href="#">Open in maps</a>
      </div>
      <div id="map"></div>
    </section>

    <section class="view" id="passportView">
      <div class="grid" id="passportGrid"></div>
      <div class="pager">
        <button id="prevPassportPage" type="button">Prev</button>
        <span id="passportPageLabel"></span>
        <button id="nextPassportPage" type="button">Next</button>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script>
    const $ = (id) => document.getElementById(id);
    let selection = null;
    let onStamps = false;
    let map = null;
    let marker = null;

    const setStatus = (message, type) => {
      $('status').textContent = message;
      $('status').dataset.type = type || '';
    };

    const api = async (path, body) => {
      const res = await fetch(path, body === undefined ? {} : {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const setCount = (summary) => {
      $('countBadge').textContent = `${summary.visited} / ${summary.total}`;
    };

    const panToSelected = () => {
      if (!selection || typeof L === 'undefined') return;
      const at = [selection.lat, selection.lng];
      if (!map) {
        map = L.map('map').setView(at, 14);
        L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
          maxZoom: 19,
          attribution: '&copy; OpenStreetMap'
        }).addTo(map);
        marker = L.marker(at).addTo(map);
      }
      marker.setLatLng(at).bindPopup(selection.name);
      map.setView(at, 15, { animate: true });
    };

    const renderList = () => {
      const s = selection;
      const label = s.visited
        ? (s.date_display ? `✓ Visited • ${s.date_display}` : '✓ Visited (tap to undo)')
        : '✅ Mark as visited';
      $('poolList').innerHTML = `
        <div class="pool-item">
          <div class="pool-name"></div>
          <button class="stamp-chip ${s.visited ? 'stamped' : 'cta'}" type="button"></button>
        </div>`;
      $('poolList').querySelector('.pool-name').textContent = s.name;
      const chip = $('poolList').querySelector('.stamp-chip');
      chip.textContent = label;
      chip.addEventListener('click', () => toggleStamp(s.id).catch((e) => setStatus(e.message, 'error')));
      $('openNativeMap').href = s.map_url;
      setCount(s.summary);
    };

    const loadSelection = async (body) => {
      selection = await api('/api/selection', body);
      renderList();
      panToSelected();
    };

    const renderStamps = (data, popId) => {
      const grid = $('passportGrid');
      grid.innerHTML = '';
      data.items.forEach((stamp) => {
        const card = document.createElement('div');
        card.className = 'passport';
        card.innerHTML = `
          <div class="title"></div>
          <div class="stamp ${popId === stamp.id ? 'pop' : ''}">
            <img alt="stamp">
            <div class="label"></div>
          </div>
          <div class="stamp-date"></div>`;
        card.querySelector('.title').textContent = stamp.name;
        card.querySelector('img').src = stamp.stamp_src;
        card.querySelector('.label').textContent = stamp.label;
        const dateEl = card.querySelector('.stamp-date');
        dateEl.textContent = stamp.date_display;
        dateEl.addEventListener('click', () => {
          const next = prompt('Edit visit date (DD/MM/YYYY):', stamp.date_display);
          if (!next) return;
          editDate(stamp.id, next).catch((e) => setStatus(e.message, 'error'));
        });
        grid.appendChild(card);
      });
      $('passportPageLabel').textContent = `Page ${data.page + 1} of ${data.total_pages}`;
      $('prevPassportPage').disabled = !data.has_prev;
      $('nextPassportPage').disabled = !data.has_next;
    };

    const loadStamps = async (popId) => renderStamps(await api('/api/stamps'), popId);

    const toggleStamp = async (id) => {
      const status = await api(`/api/pools/${encodeURIComponent(id)}/toggle`, {});
      setCount(status.summary);
      await loadSelection();
      await loadStamps(status.visited ? id : null);
    };

    const editDate = async (id, date) => {
      await api(`/api/pools/${encodeURIComponent(id)}/date`, { date });
      setStatus('', '');
      await loadSelection();
      await loadStamps(id);
    };

    const setView = (stamps) => {
      onStamps = stamps;
      document.body.classList.remove('full-map');
      $('listView').classList.toggle('active', !stamps);
      $('passportView').classList.toggle('active', stamps);
      $('toggleBtn').textContent = stamps ? 'Back to List' : 'Stamps';
      if (stamps) loadStamps().catch((e) => setStatus(e.message, 'error'));
      if (map) setTimeout(() => map.invalidateSize(), 150);
    };

    const step = (n) => loadSelection({ step: n }).catch((e) => setStatus(e.message, 'error'));
    const page = (n) => api('/api/stamps/page', { delta: n })
      .then((data) => renderStamps(data))
      .catch((e) => setStatus(e.message, 'error'));

    $('toggleBtn').addEventListener('click', () => setView(!onStamps));
    $('btnPrevPool').addEventListener('click', () => step(-1));
    $('btnNextPool').addEventListener('click', () => step(1));
    $('prevPassportPage').addEventListener('click', () => page(-1));
    $('nextPassportPage').addEventListener('click', () => page(1));

    $('mapToggle').addEventListener('click', () => {
      const full = document.body.classList.toggle('full-map');
      $('mapToggle').textContent = full ? 'Back to Split' : 'Full Map';
      $('mapToggle').setAttribute('aria-pressed', full ? 'true' : 'false');
      if (map) setTimeout(() => { map.invalidateSize(); panToSelected(); }, 150);
    });

    $('resetBtn').addEventListener('click', async () => {
      if (!confirm('Clear all stamps?')) return;
      try {
        setCount(await api('/api/reset', {}));
        await loadSelection();
        await loadStamps();
      } catch (e) {
        setStatus(e.message, 'error');
      }
    });

    loadSelection().catch((e) => setStatus(e.message, 'error'));
  </script>
</body>
</html>
"##;
