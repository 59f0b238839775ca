//! Declarative descriptor that registers the renderer executable as a node
//! inside the host visual-pipeline editor. The host runtime owns execution;
//! this module only produces the configuration data it consumes.

use serde::Serialize;

use crate::common::ExecutableVariant;

/// Base name of the companion renderer executable.
pub const RENDERER_EXECUTABLE: &str = "prism_renderer_app";

/// Texture sizes the renderer supports.
pub const TEXTURE_WIDTH_CHOICES: [u32; 5] = [256, 512, 1024, 2048, 4096];

const DEFAULT_TEXTURE_WIDTH: u32 = 1024;

/// Resource-intensity hint for the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceLevel {
    Normal,
    Intensive,
}

/// A declared input of the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeInput {
    /// A file or folder path.
    File {
        name: String,
        label: String,
        description: String,
        value: String,
    },
    /// A value from a fixed enumerated set.
    Choice {
        name: String,
        label: String,
        description: String,
        value: u32,
        values: Vec<u32>,
        exclusive: bool,
    },
}

/// A declared output of the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOutput {
    pub name: String,
    pub label: String,
    pub value: String,
}

/// Binding of one external executable as an invocable pipeline node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    /// Command line the host expands; `{allParams}` is replaced with the
    /// declared inputs by the host runtime.
    pub command_line: String,
    pub cpu: ResourceLevel,
    pub ram: ResourceLevel,
    pub inputs: Vec<NodeInput>,
    pub outputs: Vec<NodeOutput>,
}

impl NodeDescriptor {
    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}

/// Descriptor for the renderer executable: one folder input pointing at the
/// pipeline cache and one exclusive texture-width choice. CPU and RAM are
/// both intensive; the node declares no outputs.
pub fn renderer_node(variant: ExecutableVariant) -> NodeDescriptor {
    NodeDescriptor {
        command_line: format!("{RENDERER_EXECUTABLE}{} {{allParams}}", variant.suffix()),
        cpu: ResourceLevel::Intensive,
        ram: ResourceLevel::Intensive,
        inputs: vec![
            NodeInput::File {
                name: "path".to_owned(),
                label: "Input Folder".to_owned(),
                description: "Cache folder containing the structure-from-motion, dense-scene and texturing outputs."
                    .to_owned(),
                value: "{nodeCacheFolder}/../../".to_owned(),
            },
            NodeInput::Choice {
                name: "texture-width".to_owned(),
                label: "Texture Width".to_owned(),
                description: "Output texture size".to_owned(),
                value: DEFAULT_TEXTURE_WIDTH,
                values: TEXTURE_WIDTH_CHOICES.to_vec(),
                exclusive: true,
            },
        ],
        outputs: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_variant_binds_the_plain_executable() {
        let descriptor = renderer_node(ExecutableVariant::Release);
        assert_eq!(descriptor.command_line, "prism_renderer_app {allParams}");
        assert_eq!(descriptor.cpu, ResourceLevel::Intensive);
        assert_eq!(descriptor.ram, ResourceLevel::Intensive);
        assert_eq!(descriptor.inputs.len(), 2);
        assert!(descriptor.outputs.is_empty());
    }

    #[test]
    fn debug_info_variant_appends_the_suffix() {
        let descriptor = renderer_node(ExecutableVariant::ReleaseWithDebugInfo);
        assert_eq!(descriptor.command_line, "prism_renderer_app_rwdi {allParams}");
    }

    #[test]
    fn texture_width_choice_is_exclusive_with_default() {
        let descriptor = renderer_node(ExecutableVariant::Release);
        let NodeInput::Choice {
            value,
            values,
            exclusive,
            ..
        } = &descriptor.inputs[1]
        else {
            panic!("expected the texture-width choice");
        };
        assert_eq!(*value, 1024);
        assert_eq!(values, &vec![256, 512, 1024, 2048, 4096]);
        assert!(*exclusive);
    }

    #[test]
    fn descriptor_serializes_to_yaml() {
        let yaml = renderer_node(ExecutableVariant::Release).to_yaml().unwrap();
        assert!(yaml.contains("prism_renderer_app"));
        assert!(yaml.contains("cpu: intensive"));
        assert!(yaml.contains("texture-width"));
        assert!(yaml.contains("outputs: []"));
    }
}
