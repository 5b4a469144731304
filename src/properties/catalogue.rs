//! Common CSS properties with documentation.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::property::PropertyDef;

/// Common CSS properties with documentation, lazily initialized.
pub static PROPERTIES: LazyLock<HashMap<&'static str, PropertyDef>> = LazyLock::new(|| {
    let defs = vec![
        PropertyDef {
            name: "align-items",
            syntax: "normal | stretch | center | flex-start | flex-end | baseline",
            description: "Aligns flex or grid items along the cross axis.",
            example: Some("align-items: center;"),
        },
        PropertyDef {
            name: "animation",
            syntax: "<single-animation>#",
            description: "Shorthand for the animation-* properties.",
            example: Some("animation: spin 1s linear infinite;"),
        },
        PropertyDef {
            name: "background",
            syntax: "<bg-layer>#",
            description: "Shorthand for background color, image, position, size and repeat.",
            example: Some("background: #fff url(bg.png) no-repeat;"),
        },
        PropertyDef {
            name: "background-color",
            syntax: "<color>",
            description: "Sets the background color of an element.",
            example: Some("background-color: rebeccapurple;"),
        },
        PropertyDef {
            name: "border",
            syntax: "<line-width> || <line-style> || <color>",
            description: "Shorthand for border width, style and color on all four sides.",
            example: Some("border: 1px solid #ccc;"),
        },
        PropertyDef {
            name: "border-radius",
            syntax: "<length-percentage>{1,4}",
            description: "Rounds the corners of an element's border box.",
            example: Some("border-radius: 4px;"),
        },
        PropertyDef {
            name: "bottom",
            syntax: "<length-percentage> | auto",
            description: "Vertical offset of a positioned element from the bottom of its containing block.",
            example: None,
        },
        PropertyDef {
            name: "box-shadow",
            syntax: "none | <shadow>#",
            description: "Adds shadow effects around an element's frame.",
            example: Some("box-shadow: 0 1px 2px rgba(0, 0, 0, 0.2);"),
        },
        PropertyDef {
            name: "box-sizing",
            syntax: "content-box | border-box",
            description: "Sets how the total width and height of an element are calculated.",
            example: Some("box-sizing: border-box;"),
        },
        PropertyDef {
            name: "color",
            syntax: "<color>",
            description: "Sets the foreground color of text and text decorations.",
            example: Some("color: red;"),
        },
        PropertyDef {
            name: "cursor",
            syntax: "<cursor-image>#? <cursor-keyword>",
            description: "Sets the mouse cursor shown over an element.",
            example: Some("cursor: pointer;"),
        },
        PropertyDef {
            name: "display",
            syntax: "block | inline | inline-block | flex | grid | none | ...",
            description: "Sets the display type of an element.",
            example: Some("display: flex;"),
        },
        PropertyDef {
            name: "flex",
            syntax: "none | <flex-grow> <flex-shrink>? || <flex-basis>",
            description: "Shorthand for flex-grow, flex-shrink and flex-basis.",
            example: Some("flex: 1;"),
        },
        PropertyDef {
            name: "flex-direction",
            syntax: "row | row-reverse | column | column-reverse",
            description: "Sets the main axis of a flex container.",
            example: Some("flex-direction: column;"),
        },
        PropertyDef {
            name: "font",
            syntax: "<font-style>? <font-weight>? <font-size>/<line-height>? <font-family>",
            description: "Shorthand for the font-* properties.",
            example: Some("font: 16px/1.5 sans-serif;"),
        },
        PropertyDef {
            name: "font-family",
            syntax: "<family-name>#",
            description: "Prioritized list of font family names.",
            example: Some("font-family: Helvetica, sans-serif;"),
        },
        PropertyDef {
            name: "font-size",
            syntax: "<absolute-size> | <relative-size> | <length-percentage>",
            description: "Sets the size of the font.",
            example: Some("font-size: 1.25rem;"),
        },
        PropertyDef {
            name: "font-weight",
            syntax: "normal | bold | bolder | lighter | <number>",
            description: "Sets the weight of the font.",
            example: Some("font-weight: 600;"),
        },
        PropertyDef {
            name: "gap",
            syntax: "<row-gap> <column-gap>?",
            description: "Sets the gaps between rows and columns in flex and grid layouts.",
            example: Some("gap: 8px;"),
        },
        PropertyDef {
            name: "grid-template-columns",
            syntax: "none | <track-list>",
            description: "Defines the columns of a grid container.",
            example: Some("grid-template-columns: repeat(3, 1fr);"),
        },
        PropertyDef {
            name: "height",
            syntax: "auto | <length-percentage>",
            description: "Sets the height of an element.",
            example: None,
        },
        PropertyDef {
            name: "justify-content",
            syntax: "normal | center | flex-start | flex-end | space-between | space-around",
            description: "Distributes space between items along the main axis.",
            example: Some("justify-content: space-between;"),
        },
        PropertyDef {
            name: "left",
            syntax: "<length-percentage> | auto",
            description: "Horizontal offset of a positioned element from the left of its containing block.",
            example: None,
        },
        PropertyDef {
            name: "letter-spacing",
            syntax: "normal | <length>",
            description: "Sets the spacing between text characters.",
            example: None,
        },
        PropertyDef {
            name: "line-height",
            syntax: "normal | <number> | <length-percentage>",
            description: "Sets the height of a line box.",
            example: Some("line-height: 1.5;"),
        },
        PropertyDef {
            name: "margin",
            syntax: "<length-percentage> | auto{1,4}",
            description: "Sets the margin area on all four sides.",
            example: Some("margin: 0 auto;"),
        },
        PropertyDef {
            name: "max-width",
            syntax: "none | <length-percentage>",
            description: "Sets the maximum width of an element.",
            example: None,
        },
        PropertyDef {
            name: "min-height",
            syntax: "auto | <length-percentage>",
            description: "Sets the minimum height of an element.",
            example: None,
        },
        PropertyDef {
            name: "opacity",
            syntax: "<alpha-value>",
            description: "Sets the opacity of an element.",
            example: Some("opacity: 0.5;"),
        },
        PropertyDef {
            name: "overflow",
            syntax: "visible | hidden | clip | scroll | auto",
            description: "Sets what happens when content overflows the element box.",
            example: Some("overflow: hidden;"),
        },
        PropertyDef {
            name: "padding",
            syntax: "<length-percentage>{1,4}",
            description: "Sets the padding area on all four sides.",
            example: Some("padding: 8px 16px;"),
        },
        PropertyDef {
            name: "position",
            syntax: "static | relative | absolute | fixed | sticky",
            description: "Sets how an element is positioned in the document.",
            example: Some("position: absolute;"),
        },
        PropertyDef {
            name: "right",
            syntax: "<length-percentage> | auto",
            description: "Horizontal offset of a positioned element from the right of its containing block.",
            example: None,
        },
        PropertyDef {
            name: "text-align",
            syntax: "start | end | left | right | center | justify",
            description: "Sets the horizontal alignment of inline content.",
            example: Some("text-align: center;"),
        },
        PropertyDef {
            name: "text-decoration",
            syntax: "<line> || <style> || <color>",
            description: "Shorthand for text decoration line, style and color.",
            example: Some("text-decoration: underline;"),
        },
        PropertyDef {
            name: "top",
            syntax: "<length-percentage> | auto",
            description: "Vertical offset of a positioned element from the top of its containing block.",
            example: None,
        },
        PropertyDef {
            name: "transform",
            syntax: "none | <transform-function>+",
            description: "Rotates, scales, skews or translates an element.",
            example: Some("transform: translateX(-50%);"),
        },
        PropertyDef {
            name: "transition",
            syntax: "<single-transition>#",
            description: "Shorthand for the transition-* properties.",
            example: Some("transition: opacity 0.2s ease;"),
        },
        PropertyDef {
            name: "width",
            syntax: "auto | <length-percentage>",
            description: "Sets the width of an element.",
            example: None,
        },
        PropertyDef {
            name: "z-index",
            syntax: "auto | <integer>",
            description: "Sets the stacking order of a positioned element.",
            example: Some("z-index: 10;"),
        },
    ];

    defs.into_iter().map(|def| (def.name, def)).collect()
});

/// Look up a property by name, ignoring ASCII case.
pub fn get_property(name: &str) -> Option<&'static PropertyDef> {
    PROPERTIES
        .get(name)
        .or_else(|| PROPERTIES.get(name.to_ascii_lowercase().as_str()))
}
