//! Filtering of props passed down to host elements.

use crate::css::Props;

/// Global and form HTML attributes, in React prop spelling.
const HTML_ATTRS: &[&str] = &[
    "accept", "accessKey", "alt", "aria", "as", "autoCapitalize", "autoComplete", "autoFocus",
    "capture", "checked", "className", "contentEditable", "contextMenu", "controls",
    "crossOrigin", "dangerouslySetInnerHTML", "data", "dir", "disabled", "download",
    "draggable", "form", "formAction", "formEncType", "formMethod", "formNoValidate",
    "formTarget", "height", "hidden", "href", "hrefLang", "id", "is", "isMap", "inert", "key",
    "lang", "list", "loop", "max", "maxLength", "media", "min", "minLength", "multiple",
    "muted", "name", "pattern", "placeholder", "readOnly", "required", "role", "size", "slot",
    "spellCheck", "src", "srcSet", "step", "style", "tabIndex", "target", "title", "translate",
    "type", "useMap", "value", "width", "ref", "children", "class", "char", "charOff",
    "unselectable", "inputMode",
];

/// Table cell attributes.
const TABLE_ATTRS: &[&str] = &[
    "colSpan", "rowSpan", "headers", "abbr", "scope", "align", "valign",
];

/// SVG presentation and geometry attributes.
const SVG_ATTRS: &[&str] = &[
    "viewBox", "fill", "stroke", "strokeWidth", "strokeLinecap", "strokeLinejoin",
    "strokeDasharray", "strokeDashoffset", "strokeOpacity", "fillOpacity", "opacity",
    "pointerEvents", "focusable", "x", "y", "x1", "x2", "y1", "y2", "cx", "cy", "r", "rx", "ry",
    "d", "points", "height", "transform", "xmlns", "preserveAspectRatio", "mask", "clipPath",
    "pathLength", "markerStart", "markerMid", "markerEnd", "refX", "refY", "dominantBaseline",
    "textAnchor",
];

/// Event handler props.
const EVENT_ATTRS: &[&str] = &[
    "onCopy", "onCut", "onPaste", "onCompositionEnd", "onCompositionStart",
    "onCompositionUpdate", "onFocus", "onBlur", "onChange", "onInput", "onInvalid", "onReset",
    "onSubmit", "onKeyDown", "onKeyPress", "onKeyUp", "onClick", "onContextMenu",
    "onDoubleClick", "onMouseDown", "onMouseEnter", "onMouseLeave", "onMouseMove", "onMouseOut",
    "onMouseOver", "onMouseUp", "onDrag", "onDragEnd", "onDragEnter", "onDragExit",
    "onDragLeave", "onDragOver", "onDragStart", "onDrop", "onPointerDown", "onPointerMove",
    "onPointerUp", "onPointerCancel", "onPointerEnter", "onPointerLeave", "onPointerOver",
    "onPointerOut", "onGotPointerCapture", "onLostPointerCapture", "onSelect", "onTouchCancel",
    "onTouchEnd", "onTouchMove", "onTouchStart", "onScroll", "onWheel", "onAbort", "onCanPlay",
    "onCanPlayThrough", "onDurationChange", "onEmptied", "onEncrypted", "onEnded",
    "onLoadedData", "onLoadedMetadata", "onLoadStart", "onPause", "onPlay", "onPlaying",
    "onProgress", "onRateChange", "onSeeked", "onSeeking", "onStalled", "onSuspend",
    "onTimeUpdate", "onVolumeChange", "onWaiting", "onLoad", "onError",
];

/// Whether `name` may be forwarded to a host element.
///
/// Known DOM attribute props pass, as does any `data-*` or `aria-*` key.
pub fn is_valid_dom_attr(name: &str) -> bool {
    name.starts_with("data-")
        || name.starts_with("aria-")
        || [HTML_ATTRS, TABLE_ATTRS, SVG_ATTRS, EVENT_ATTRS]
            .iter()
            .any(|group| group.contains(&name))
}

/// Drop props a host element would not understand.
pub fn filter_non_html_attrs(props: &Props) -> Props {
    let mut filtered = props.clone();
    filtered.retain(is_valid_dom_attr);
    filtered
}
