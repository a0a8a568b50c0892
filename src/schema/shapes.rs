use super::types::{FieldSpec, FieldType, Presence, Shape, ShapeKind};

const ITEM_TYPES: &[&str] = &["story", "comment", "job", "poll", "pollopt"];

const fn field(name: &'static str, ty: FieldType, presence: Presence) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        presence,
        allowed: &[],
        minimum: None,
    }
}

const fn counter(name: &'static str, presence: Presence) -> FieldSpec {
    FieldSpec {
        name,
        ty: FieldType::Integer,
        presence,
        allowed: &[],
        minimum: Some(0),
    }
}

const fn discriminator(allowed: &'static [&'static str], presence: Presence) -> FieldSpec {
    FieldSpec {
        name: "type",
        ty: FieldType::String,
        presence,
        allowed,
        minimum: None,
    }
}

const ID: FieldSpec = counter("id", Presence::Required);
const TIME: FieldSpec = counter("time", Presence::Required);
const DELETED: FieldSpec = field("deleted", FieldType::Boolean, Presence::Optional);
const DEAD: FieldSpec = field("dead", FieldType::Boolean, Presence::Optional);
const KIDS: FieldSpec = field("kids", FieldType::IntegerArray, Presence::Optional);
const TEXT: FieldSpec = field("text", FieldType::String, Presence::Optional);
const URL: FieldSpec = field("url", FieldType::String, Presence::Optional);
const SCORE: FieldSpec = counter("score", Presence::Optional);
const DESCENDANTS: FieldSpec = counter("descendants", Presence::Optional);
const BY: FieldSpec = field("by", FieldType::String, Presence::RequiredUnlessDeleted);
const TITLE: FieldSpec = field("title", FieldType::String, Presence::RequiredUnlessDeleted);

static ITEM: Shape = Shape {
    name: "item",
    fields: &[
        ID,
        discriminator(ITEM_TYPES, Presence::Optional),
        field("by", FieldType::String, Presence::Optional),
        counter("time", Presence::Optional),
        TEXT,
        DELETED,
        DEAD,
        counter("parent", Presence::Optional),
        counter("poll", Presence::Optional),
        KIDS,
        URL,
        SCORE,
        field("title", FieldType::String, Presence::Optional),
        field("parts", FieldType::IntegerArray, Presence::Optional),
        DESCENDANTS,
    ],
};

static STORY: Shape = Shape {
    name: "story",
    fields: &[
        ID,
        discriminator(&["story"], Presence::Required),
        BY,
        TIME,
        TITLE,
        counter("score", Presence::RequiredUnlessDeleted),
        DESCENDANTS,
        KIDS,
        URL,
        TEXT,
        DELETED,
        DEAD,
    ],
};

static COMMENT: Shape = Shape {
    name: "comment",
    fields: &[
        ID,
        discriminator(&["comment"], Presence::Required),
        BY,
        TIME,
        counter("parent", Presence::Required),
        field("text", FieldType::String, Presence::RequiredUnlessDeleted),
        KIDS,
        DELETED,
        DEAD,
    ],
};

static JOB: Shape = Shape {
    name: "job",
    fields: &[
        ID,
        discriminator(&["job"], Presence::Required),
        BY,
        TIME,
        TITLE,
        SCORE,
        TEXT,
        URL,
        DELETED,
        DEAD,
    ],
};

static POLL: Shape = Shape {
    name: "poll",
    fields: &[
        ID,
        discriminator(&["poll"], Presence::Required),
        BY,
        TIME,
        TITLE,
        field("parts", FieldType::IntegerArray, Presence::RequiredUnlessDeleted),
        SCORE,
        DESCENDANTS,
        KIDS,
        TEXT,
        DELETED,
        DEAD,
    ],
};

static POLL_OPT: Shape = Shape {
    name: "pollopt",
    fields: &[
        ID,
        discriminator(&["pollopt"], Presence::Required),
        BY,
        TIME,
        counter("poll", Presence::Required),
        SCORE,
        TEXT,
        DELETED,
        DEAD,
    ],
};

static USER: Shape = Shape {
    name: "user",
    fields: &[
        field("id", FieldType::String, Presence::Required),
        counter("created", Presence::Required),
        field("karma", FieldType::Integer, Presence::Required),
        field("about", FieldType::String, Presence::Optional),
        field("submitted", FieldType::IntegerArray, Presence::Optional),
        counter("delay", Presence::Optional),
    ],
};

impl ShapeKind {
    #[must_use]
    pub const fn shape(self) -> &'static Shape {
        match self {
            ShapeKind::Item => &ITEM,
            ShapeKind::Story => &STORY,
            ShapeKind::Comment => &COMMENT,
            ShapeKind::Job => &JOB,
            ShapeKind::Poll => &POLL,
            ShapeKind::PollOpt => &POLL_OPT,
            ShapeKind::User => &USER,
        }
    }
}
