//! System prompt sent alongside the document preview.

use std::fmt::Write;

use crate::host::DocumentSnapshot;

const PLAN_SCHEMA: &str = r#"{
  "operations": [
    {
      "type": "resize|crop|blur|colorCorrection|sharpness|selectSubject|mergeLayers",
      "layerName": "exact layer name from the list" or null (null = all layers),
      "params": {
        // resize: { "width": number, "height": number, "method": "bicubic|bilinear|nearestNeighbor|bicubicSharper" }
        // crop: {
        //   "width": number,
        //   "height": number,
        //   "position": "center|top|bottom|left|right|coordinates",
        //   "focusBox": { "x": 0-100, "y": 0-100, "width": 0-100, "height": 0-100 } // only with "coordinates"
        //   "padding": 15-40 // percent of extra room around the subject, default 20
        // }
        // blur: { "blurType": "gaussian|motion|radial", "radius": number, "angle": number (motion only) }
        // colorCorrection: { "brightness": -150..150, "contrast": -50..100, "saturation": -100..100, "temperature": -100..100 }
        // sharpness: { "amount": 0.1..500, "radius": 0.1..250 }
        // selectSubject: { "copyToNewLayer": true }
        // mergeLayers: { "layerNames": [exact layer names] }
      }
    }
  ],
  "explanation": "Short description of every operation in the plan"
}"#;

const RULES: &str = r#"Rules:
1. Layer names. When the request mentions a layer ("layer 1", "the background"), put the
   exact name from the list above in "layerName". Never use an index number.
2. Every requested edit. A request asking for several edits needs one operation per edit,
   in the order they should run. Do not drop any of them.
3. Subject and background. When the subject and the background need different edits
   (for example "sharpen the cat, blur the background"):
   - the first operation is selectSubject with "copyToNewLayer": true and "layerName": null;
   - the second operation applies the subject edit to the new layer, usually named
     "Layer 1" or the next free number;
   - later operations apply background edits to the original layer ("Background" or "Layer 0").
4. Aspect ratios. Formats such as "story", "portrait" or "square" are ratios, not fixed sizes.
   Story and portrait are 9:16, square is 1:1, landscape is 16:9. Derive the crop size from
   the current dimensions so nothing is stretched: a 2000x3000 image cropped to 9:16 keeps
   its 3000px height and becomes 1687px wide.
5. Focus crops. To frame a specific subject, set "position" to "coordinates" and give a
   focusBox in percent of the image size. Make the box generous: include the whole subject
   with room to spare (head and shoulders for a portrait, head and part of the body for an
   animal). Use padding 25-35 for tight subjects such as faces. If the subject cannot be
   found in the image, use "position": "center" and say so in the explanation."#;

/// Builds the instruction text for one analysis request.
pub fn build_system_prompt(snapshot: &DocumentSnapshot, instruction: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are an image editing assistant with vision. You can see the attached image \
         and understand its composition.\n\n",
    );
    let _ = writeln!(
        prompt,
        "Image dimensions: {}x{}px\n",
        snapshot.width, snapshot.height
    );
    prompt.push_str("Available layers (use these exact names):\n");
    for layer in &snapshot.layers {
        let visibility = if layer.visible { "visible" } else { "hidden" };
        let _ = writeln!(
            prompt,
            "- \"{}\" ({visibility}, opacity: {}%)",
            layer.name, layer.opacity
        );
    }
    prompt.push('\n');
    prompt.push_str(RULES);
    prompt.push_str(
        "\n\nLook at the image and the request, decide which operations are needed, \
         and answer with JSON in exactly this shape:\n\n",
    );
    prompt.push_str(PLAN_SCHEMA);
    let _ = write!(
        prompt,
        "\n\nUser request: {instruction}\n\nReturn only valid JSON, without markdown or extra text."
    );
    prompt
}
