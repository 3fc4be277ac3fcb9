use crate::core::controls::material_section;
use crate::core::mesh::MeshData;
use crate::core::ply::parse_ply;
use crate::core::{SceneParams, MESH_SCALE, MESH_URL, TEXTURE_BASE_URL, TEXTURE_FILES};
use crate::dom::js_err;
use crate::panel::Panel;
use crate::render::{GpuState, SceneState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_value.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("GET {} -> HTTP {}", url, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn fetch_texture(name: &str) -> anyhow::Result<image::RgbaImage> {
    let url = format!("{}{}", TEXTURE_BASE_URL, name);
    let bytes = fetch_bytes(&url).await?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Start every texture download; each lands in the GPU library on its own.
pub fn load_textures(gpu: Rc<RefCell<GpuState<'static>>>) {
    for name in TEXTURE_FILES {
        let gpu = gpu.clone();
        spawn_local(async move {
            match fetch_texture(name).await {
                Ok(img) => {
                    gpu.borrow_mut().insert_texture(name, &img);
                    log::info!("[assets] texture {} ({}x{})", name, img.width(), img.height());
                }
                Err(e) => log::warn!("[assets] texture {} failed: {:?}", name, e),
            }
        });
    }
}

async fn fetch_mesh() -> anyhow::Result<MeshData> {
    let bytes = fetch_bytes(MESH_URL).await?;
    let mut mesh = MeshData::from(parse_ply(&bytes)?);
    mesh.scale(MESH_SCALE);
    mesh.compute_vertex_normals();
    Ok(mesh)
}

pub struct MeshWiring {
    pub gpu: Rc<RefCell<GpuState<'static>>>,
    pub scene: Rc<RefCell<SceneState>>,
    pub params: Rc<RefCell<SceneParams>>,
    pub panel: Rc<Panel>,
}

/// Load the statue; on success it joins the scene and gets its panel section.
/// A failed load leaves the scene without a mesh.
pub fn load_mesh(w: MeshWiring) {
    spawn_local(async move {
        let mesh = match fetch_mesh().await {
            Ok(m) => m,
            Err(e) => {
                log::warn!("[assets] mesh {} failed: {:?}", MESH_URL, e);
                return;
            }
        };
        log::info!(
            "[assets] mesh {} vertices={} triangles={}",
            MESH_URL,
            mesh.positions.len(),
            mesh.indices.len() / 3
        );
        if let Some((lo, hi)) = mesh.bounds() {
            log::debug!("[assets] mesh bounds {:?}..{:?}", lo, hi);
        }
        let buffers = w.gpu.borrow().upload_mesh(&mesh);
        w.scene
            .borrow_mut()
            .mesh_loaded(buffers, &w.params.borrow().material);
        if let Err(e) = w.panel.add_section(material_section()) {
            log::warn!("[panel] material section: {:?}", e);
        }
    });
}
