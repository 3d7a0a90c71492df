//! Express artifact templates.
//!
//! Pure text generation: every function here maps (resource, fields) to
//! JavaScript source with no I/O, so the output can be asserted against
//! literal expected strings. [`ExpressTemplates`] adapts these functions to
//! the core's `ArtifactRenderer` port.

use apigen_core::{
    application::ports::ArtifactRenderer,
    domain::{ArtifactKind, FieldMap, HttpMethod, ResourceName},
};

/// Renderer producing ESM Express modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressTemplates;

impl ExpressTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactRenderer for ExpressTemplates {
    fn render(&self, kind: ArtifactKind, resource: &ResourceName, fields: &FieldMap) -> String {
        match kind {
            ArtifactKind::Model => model_source(resource, fields),
            ArtifactKind::Controller => controller_source(resource),
            ArtifactKind::Route => route_source(resource),
        }
    }

    fn method_route(&self, method: HttpMethod, resource: &str, param: Option<&str>) -> String {
        method_route_source(method, resource, param)
    }

    fn server_module(&self) -> String {
        SERVER_MODULE.to_string()
    }

    fn data_service_module(&self) -> String {
        DATA_SERVICE_MODULE.to_string()
    }
}

/// Model module: the resource's schema object plus an instance factory.
///
/// A field named `name` left unset defaults to `"<CapitalizedSingular> " + id`;
/// every other non-id field is copied through from the request body.
pub fn model_source(resource: &ResourceName, fields: &FieldMap) -> String {
    let singular = resource.singular();
    let cap = resource.capitalized_singular();

    let schema_fields = fields
        .iter()
        .map(|(name, ty)| format!("  {name}: '{ty}'"))
        .collect::<Vec<_>>()
        .join(",\n");

    let instance_fields = fields
        .keys()
        .filter(|name| *name != "id")
        .map(|name| {
            if name == "name" {
                format!("    name: data.name || \"{cap} \" + id")
            } else {
                format!("    {name}: data.{name}")
            }
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"import {{ randomUUID }} from 'node:crypto'

export const {singular}Schema = {{
{schema_fields}
}}

export function create{cap}Instance(data) {{
  const id = randomUUID()
  return {{
    id,
{instance_fields}
  }}
}}
"#
    )
}

/// Controller module: five handlers, each wrapped in a guard translating any
/// unexpected failure into a generic 500 carrying the failure's message.
pub fn controller_source(resource: &ResourceName) -> String {
    let singular = resource.singular();
    let plural = resource.plural();
    let cap = resource.capitalized_singular();
    let cap_plural = resource.capitalized_plural();

    format!(
        r#"import * as dataService from '../services/dataService.js'
import {{ create{cap}Instance }} from '../models/{singular}.js'

export async function getAll{cap_plural}(req, res) {{
  try {{
    const rows = await dataService.getAll('{plural}')
    res.json(rows)
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}}

export async function get{cap}ById(req, res) {{
  try {{
    const item = await dataService.getById('{plural}', req.params.id)
    if (!item) return res.status(404).json({{ error: 'Not found' }})
    res.json(item)
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}}

export async function create{cap}(req, res) {{
  try {{
    const item = create{cap}Instance(req.body)
    const saved = await dataService.create('{plural}', item)
    res.status(201).json(saved)
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}}

export async function update{cap}(req, res) {{
  try {{
    const updated = await dataService.update('{plural}', req.params.id, req.body)
    if (!updated) return res.status(404).json({{ error: 'Not found' }})
    res.json(updated)
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}}

export async function delete{cap}(req, res) {{
  try {{
    const deleted = await dataService.remove('{plural}', req.params.id)
    if (!deleted) return res.status(404).json({{ error: 'Not found' }})
    res.status(204).send()
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}}
"#
    )
}

/// Route module: mounts the five conventional CRUD paths.
pub fn route_source(resource: &ResourceName) -> String {
    let plural = resource.plural();
    let cap = resource.capitalized_singular();
    let cap_plural = resource.capitalized_plural();

    format!(
        r#"import express from 'express'
import * as controller from '../controllers/{plural}Controller.js'

const router = express.Router()

router.get('/', controller.getAll{cap_plural})
router.get('/:id', controller.get{cap}ById)
router.post('/', controller.create{cap})
router.put('/:id', controller.update{cap})
router.delete('/:id', controller.delete{cap})

export default router
"#
    )
}

/// A single method-specific top-level route for injection into the server
/// module. `param` names the path parameter (conventionally `id`); GET
/// without a param lists the whole collection.
pub fn method_route_source(method: HttpMethod, resource: &str, param: Option<&str>) -> String {
    match method {
        HttpMethod::Get => match param {
            Some(param) => format!(
                r#"app.get('/{resource}/:{param}', async (req, res) => {{
  try {{
    const data = await readData()
    const item = (data.{resource} || []).find(item => item.{param} === req.params.{param})
    if (!item) return res.status(404).json({{ error: '{resource} not found' }})
    res.json(item)
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}})"#
            ),
            None => format!(
                r#"app.get('/{resource}', async (req, res) => {{
  try {{
    const data = await readData()
    res.json(data.{resource} || [])
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}})"#
            ),
        },
        HttpMethod::Post => format!(
            r#"app.post('/{resource}', async (req, res) => {{
  try {{
    const data = await readData()
    if (!data.{resource}) data.{resource} = []
    const newItem = {{ ...req.body, id: Date.now().toString() }}
    data.{resource}.push(newItem)
    await writeData(data)
    res.status(201).json(newItem)
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}})"#
        ),
        HttpMethod::Put => {
            let param = param.unwrap_or("id");
            format!(
                r#"app.put('/{resource}/:{param}', async (req, res) => {{
  try {{
    const data = await readData()
    if (!data.{resource}) return res.status(404).json({{ error: 'Resource not found' }})
    const index = data.{resource}.findIndex(item => item.{param} === req.params.{param})
    if (index === -1) return res.status(404).json({{ error: 'Item not found' }})
    data.{resource}[index] = {{ ...req.body, {param}: req.params.{param} }}
    await writeData(data)
    res.json(data.{resource}[index])
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}})"#
            )
        }
        HttpMethod::Delete => {
            let param = param.unwrap_or("id");
            format!(
                r#"app.delete('/{resource}/:{param}', async (req, res) => {{
  try {{
    const data = await readData()
    if (!data.{resource}) return res.status(404).json({{ error: 'Resource not found' }})
    data.{resource} = data.{resource}.filter(item => item.{param} !== req.params.{param})
    await writeData(data)
    res.status(204).send()
  }} catch (error) {{
    res.status(500).json({{ error: error.message }})
  }}
}})"#
            )
        }
    }
}

/// Standalone Express server: JSON body parsing, data-store bootstrap,
/// glob-based route registration, listen on `$PORT` or 3000.
pub const SERVER_MODULE: &str = r#"import express from 'express'
import process from 'node:process'
import { promises as fs } from 'fs'
import path from 'path'
import { fileURLToPath, pathToFileURL } from 'url'
import glob from 'fast-glob'

const __filename = fileURLToPath(import.meta.url)
const __dirname = path.dirname(__filename)

const DATA_DIR = path.join(__dirname, 'data')
const DATA_PATH = path.join(DATA_DIR, 'data_store.json')
const ROUTES_DIR = path.join(__dirname, 'routes')
const PORT = process.env.PORT || 3000

const app = express()
app.use(express.json())

async function ensureDataStoreFile() {
  try {
    await fs.mkdir(DATA_DIR, { recursive: true })
    const content = await fs.readFile(DATA_PATH, 'utf8')
    if (!content.trim()) {
      await fs.writeFile(DATA_PATH, '{}', 'utf8')
    } else {
      JSON.parse(content)
    }
  } catch (err) {
    if (err.code === 'ENOENT') {
      await fs.mkdir(DATA_DIR, { recursive: true })
      await fs.writeFile(DATA_PATH, '{}', 'utf8')
    } else {
      console.error('Invalid data_store.json:', err.message)
      process.exit(1)
    }
  }
}

async function registerRoutes() {
  const files = await glob('*.js', { cwd: ROUTES_DIR })
  for (const f of files) {
    const modulePath = path.join(ROUTES_DIR, f)
    try {
      const mod = await import(pathToFileURL(modulePath).href)
      const mount = '/' + path.basename(f, '.js')
      app.use(mount, mod.default)
    } catch (err) {
      console.error(`Failed to load route ${f}: ${err.message}`)
    }
  }
}

await ensureDataStoreFile()
await registerRoutes()

app.listen(PORT, () => console.log(`Server http://localhost:${PORT}`))
"#;

/// Shared data-service module imported by every generated controller.
pub const DATA_SERVICE_MODULE: &str = r#"import { readFile, writeFile, mkdir } from 'fs/promises'
import path from 'path'
import { fileURLToPath } from 'url'

const __filename = fileURLToPath(import.meta.url)
const __dirname = path.dirname(__filename)

const DATA_DIR = path.join(__dirname, '../data')
const STORE_FILE = path.join(DATA_DIR, 'data_store.json')

async function ensureDataDir() { await mkdir(DATA_DIR, { recursive: true }) }

async function load() {
  try {
    const text = await readFile(STORE_FILE, 'utf8')
    return text.trim() ? JSON.parse(text) : {}
  } catch (err) {
    if (err.code === 'ENOENT') return {}
    throw err
  }
}

async function save(data) {
  await ensureDataDir()
  await writeFile(STORE_FILE, JSON.stringify(data, null, 2))
}

export async function getAll(resource) {
  const data = await load()
  return data[resource] || []
}

export async function getById(resource, id) {
  const data = await load()
  return (data[resource] || []).find(item => item.id === id)
}

export async function create(resource, item) {
  const data = await load()
  if (!data[resource]) data[resource] = []
  data[resource].push(item)
  await save(data)
  return item
}

export async function update(resource, id, newData) {
  const data = await load()
  const items = data[resource]
  if (!items) return null
  const index = items.findIndex(item => item.id === id)
  if (index === -1) return null
  data[resource][index] = { ...items[index], ...newData, id }
  await save(data)
  return data[resource][index]
}

export async function remove(resource, id) {
  const data = await load()
  const items = data[resource]
  if (!items) return false
  const filtered = items.filter(item => item.id !== id)
  if (filtered.length === items.length) return false
  data[resource] = filtered
  await save(data)
  return true
}
"#;

// ── tests ─────────────────────────────────────────────────────────────────────
