/*!
A celestial-object database: stars and deep-sky objects indexed in a
magnitude-aware octree, supporting visible-object (frustum + limiting
magnitude) and proximity queries.

Grounded on Celestia's `celengine` star and deep-sky-object databases
(see `original_source/` in the material this crate was built against);
reworked here as a standalone, general-purpose catalog crate rather
than a rendering engine's internal data store.

Build a database with [DatabaseBuilder], loading records from any mix
of [formats] readers, then [DatabaseBuilder::seal] it into an immutable
[Database] and query it with [Database::find_visible_stars],
[Database::find_close_stars] and friends.
*/

pub type Vec3 = geo_nd::FArray<f32, 3>;
pub type Vec4 = geo_nd::FArray<f32, 4>;
pub type Quat = geo_nd::QArray<f32, Vec3, Vec4>;

mod error;
pub use error::Error;

mod catalog_number;
pub use catalog_number::{
    decode_tyc, encode_tyc, format_name, infer_catalog_kind, is_auto_allocated, is_hip,
    parse_name, CatalogKind, CatalogNumber, AUTO_INDEX_MAX, AUTO_INDEX_MIN, HIP_MAX,
    INVALID_CATALOG_NUMBER,
};

pub mod astro;

mod name;
pub use name::NameDatabase;

mod crossindex;
pub use crossindex::CrossIndex;

pub mod spectral;
pub use spectral::{LuminosityClass, SpectralClass, StarDetails, StarDetailsRegistry};

mod star;
pub use star::Star;

mod dso;
pub use dso::{DeepSkyObject, DeepSkyObjectType, DSO_DEFAULT_ABS_MAGNITUDE};

pub mod octree;
pub use octree::{DynamicOctree, OctreeObject, OctreeVisitor, StaticOctree, StaticOctreeNode};

pub mod query;
pub use query::{CloseObjects, Frustum, Plane, VisibleDsos, VisibleStars};

mod database;
pub use database::{Database, ObjectRef};

mod builder;
pub use builder::DatabaseBuilder;

pub mod formats;
