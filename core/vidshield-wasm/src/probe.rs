//! [`EnvironmentProbe`] backed by the browser.

use crate::js;
use std::cell::RefCell;
use tracing::debug;
use vidshield_device::{
    CanvasOp, EnvironmentProbe, GpuDescriptor, ProbeError, ProbeResult, ScreenGeometry,
};
use wasm_bindgen::JsValue;

const MEASURE_FONT_SIZE: &str = "72px";

/// Probes the page's global scope (`window`).
///
/// Surfaces are created per call and discarded afterwards, except the 2-D
/// context used for text measurement, which is created once and reused.
#[derive(Debug, Clone)]
pub struct BrowserProbe {
    global: JsValue,
    measure: RefCell<Option<JsValue>>,
}

impl Default for BrowserProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserProbe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            global: js_sys::global().into(),
            measure: RefCell::new(None),
        }
    }

    fn navigator(&self) -> ProbeResult<JsValue> {
        js::property(&self.global, "navigator")
    }

    fn canvas(&self) -> ProbeResult<JsValue> {
        let document = js::property(&self.global, "document")?;
        js::call(&document, "createElement", &["canvas".into()])
    }

    fn context(canvas: &JsValue, kind: &'static str) -> ProbeResult<Option<JsValue>> {
        let context = js::call(canvas, "getContext", &[kind.into()])?;
        Ok((!context.is_null() && !context.is_undefined()).then_some(context))
    }

    fn context_2d(&self) -> ProbeResult<(JsValue, JsValue)> {
        let canvas = self.canvas()?;
        let context = Self::context(&canvas, "2d")?.ok_or(ProbeError::Unsupported("2d context"))?;
        Ok((canvas, context))
    }

    fn measure_context(&self) -> ProbeResult<JsValue> {
        if let Some(context) = self.measure.borrow().clone() {
            return Ok(context);
        }
        let (_, context) = self.context_2d()?;
        *self.measure.borrow_mut() = Some(context.clone());
        Ok(context)
    }
}

fn font_shorthand(family: &str) -> String {
    format!("{MEASURE_FONT_SIZE} {family}")
}

fn draw(context: &JsValue, op: CanvasOp) -> ProbeResult<()> {
    match op {
        CanvasOp::TextBaseline(value) => js::set(context, "textBaseline", &value.into()),
        CanvasOp::Font(value) => js::set(context, "font", &value.into()),
        CanvasOp::FillStyle(value) => js::set(context, "fillStyle", &value.into()),
        CanvasOp::FillRect(x, y, w, h) => js::call(
            context,
            "fillRect",
            &[x.into(), y.into(), w.into(), h.into()],
        )
        .map(drop),
        CanvasOp::FillText(text, x, y) => {
            js::call(context, "fillText", &[text.into(), x.into(), y.into()]).map(drop)
        }
    }
}

fn as_u32(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

impl EnvironmentProbe for BrowserProbe {
    fn render_canvas(&self, scene: &[CanvasOp]) -> ProbeResult<String> {
        let (canvas, context) = self.context_2d()?;
        for op in scene {
            draw(&context, *op)?;
        }
        js::call(&canvas, "toDataURL", &[])?
            .as_string()
            .ok_or(ProbeError::Unsupported("toDataURL"))
    }

    fn gpu_descriptor(&self) -> ProbeResult<Option<GpuDescriptor>> {
        let canvas = self.canvas()?;
        let gl = match Self::context(&canvas, "webgl")? {
            Some(gl) => gl,
            None => Self::context(&canvas, "experimental-webgl")?
                .ok_or(ProbeError::Unsupported("webgl"))?,
        };
        let info = js::call(&gl, "getExtension", &["WEBGL_debug_renderer_info".into()])?;
        if info.is_null() || info.is_undefined() {
            debug!("WEBGL_debug_renderer_info not exposed");
            return Ok(None);
        }
        let read = |name: &'static str| -> ProbeResult<String> {
            let param = js::property(&info, name)?;
            js::call(&gl, "getParameter", &[param])?
                .as_string()
                .ok_or(ProbeError::Unsupported(name))
        };
        Ok(Some(GpuDescriptor {
            vendor: read("UNMASKED_VENDOR_WEBGL")?,
            renderer: read("UNMASKED_RENDERER_WEBGL")?,
        }))
    }

    fn screen(&self) -> ProbeResult<ScreenGeometry> {
        let screen = js::property(&self.global, "screen")?;
        Ok(ScreenGeometry {
            width: as_u32(js::number(&screen, "width")?),
            height: as_u32(js::number(&screen, "height")?),
            color_depth: as_u32(js::number(&screen, "colorDepth")?),
        })
    }

    fn timezone(&self) -> ProbeResult<String> {
        let intl = js::property(&self.global, "Intl")?;
        let format = js::construct(&intl, "DateTimeFormat", &[])?;
        let options = js::call(&format, "resolvedOptions", &[])?;
        js::string(&options, "timeZone")
    }

    fn language(&self) -> ProbeResult<String> {
        js::string(&self.navigator()?, "language")
    }

    fn platform(&self) -> ProbeResult<String> {
        js::string(&self.navigator()?, "platform")
    }

    fn hardware_concurrency(&self) -> ProbeResult<Option<u32>> {
        Ok(js::optional_number(&self.navigator()?, "hardwareConcurrency")?.map(as_u32))
    }

    fn device_memory(&self) -> ProbeResult<Option<f64>> {
        js::optional_number(&self.navigator()?, "deviceMemory")
    }

    fn user_agent(&self) -> ProbeResult<String> {
        js::string(&self.navigator()?, "userAgent")
    }

    fn measure_text(&self, font_family: &str, sample: &str) -> ProbeResult<f64> {
        let context = self.measure_context()?;
        js::set(&context, "font", &font_shorthand(font_family).into())?;
        let metrics = js::call(&context, "measureText", &[sample.into()])?;
        js::number(&metrics, "width")
    }

    fn max_touch_points(&self) -> ProbeResult<Option<u32>> {
        Ok(js::optional_number(&self.navigator()?, "maxTouchPoints")?.map(as_u32))
    }

    fn plugin_count(&self) -> ProbeResult<u32> {
        let plugins = js::property(&self.navigator()?, "plugins")?;
        Ok(as_u32(js::number(&plugins, "length")?))
    }
}
