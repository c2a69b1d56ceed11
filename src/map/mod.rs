//! Entity records, one module per chunk type.

pub mod annotation;
pub mod light;
pub mod line;
pub mod map_info;
pub mod media;
pub mod object;
pub mod placement;
pub mod platform;
pub mod point;
pub mod polygon;
pub mod side;
pub mod sound;

pub use annotation::Annotation;
pub use light::{FunctionKind, Light, LightFlags, LightType, LightingFunction};
pub use line::{Line, LineFlags};
pub use map_info::{EntryPointFlags, EnvironmentFlags, MapInfo, MissionFlags};
pub use media::{Media, MediaType};
pub use object::{MapObject, ObjectFlags, ObjectKind};
pub use placement::{Placement, PLACEMENT_COUNT};
pub use platform::{DynamicPlatform, Platform, PlatformFlags, PlatformType};
pub use point::{Endpoint, Point};
pub use polygon::{Polygon, PolygonType, MAX_VERTICES_PER_POLYGON};
pub use side::{Side, SideFlags, SideType, TextureDefinition};
pub use sound::{AmbientSound, RandomSound};
