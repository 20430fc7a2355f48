use serde::{Deserialize, Serialize};

/// User-invoked constraint menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    DistanceDia,
    OnEntity,
    Equal,
    Ratio,
    AtMidpoint,
    Symmetric,
    Horizontal,
    Vertical,
    OrientedSame,
    OtherAngle,
    Reference,
    Angle,
    Parallel,
    Perpendicular,
    Comment,
}

impl Command {
    /// Message shown when the selection fits none of this command's shapes.
    /// It doubles as the user documentation of what the command accepts.
    /// Line breaks are `\n`, never `\r\n`.
    pub fn bad_selection_message(self) -> &'static str {
        match self {
            Command::DistanceDia => concat!(
                "Bad selection for distance / diameter constraint. This ",
                "constraint can apply to:\n\n",
                "    * two points (distance between points)\n",
                "    * a line segment (length)\n",
                "    * a workplane and a point (minimum distance)\n",
                "    * a line segment and a point (minimum distance)\n",
                "    * a plane face and a point (minimum distance)\n",
                "    * a circle or an arc (diameter)\n",
            ),
            Command::OnEntity => concat!(
                "Bad selection for on point / curve / plane constraint. ",
                "This constraint can apply to:\n\n",
                "    * two points (points coincident)\n",
                "    * a point and a workplane (point in plane)\n",
                "    * a point and a line segment (point on line)\n",
                "    * a point and a circle or arc (point on curve)\n",
                "    * a point and a plane face (point on face)\n",
            ),
            Command::Equal => concat!(
                "Bad selection for equal length / radius constraint. ",
                "This constraint can apply to:\n\n",
                "    * two line segments (equal length)\n",
                "    * two line segments and two points ",
                "(equal point-line distances)\n",
                "    * a line segment and two points ",
                "(equal point-line distances)\n",
                "    * a line segment, and a point and line segment ",
                "(point-line distance equals length)\n",
                "    * four line segments or normals ",
                "(equal angle between A,B and C,D)\n",
                "    * three line segments or normals ",
                "(equal angle between A,B and B,C)\n",
                "    * two circles or arcs (equal radius)\n",
            ),
            Command::Ratio => concat!(
                "Bad selection for length ratio constraint. This ",
                "constraint can apply to:\n\n",
                "    * two line segments\n",
            ),
            Command::AtMidpoint => concat!(
                "Bad selection for at midpoint constraint. This ",
                "constraint can apply to:\n\n",
                "    * a line segment and a point (point at midpoint)\n",
                "    * a line segment and a workplane (line's midpoint on plane)\n",
            ),
            Command::Symmetric => concat!(
                "Bad selection for symmetric constraint. This constraint ",
                "can apply to:\n\n",
                "    * two points or a line segment ",
                "(symmetric about workplane's coordinate axis)\n",
                "    * line segment, and two points or a line segment ",
                "(symmetric about line segment)\n",
                "    * workplane, and two points or a line segment ",
                "(symmetric about workplane)\n",
            ),
            Command::Horizontal | Command::Vertical => concat!(
                "Bad selection for horizontal / vertical constraint. ",
                "This constraint can apply to:\n\n",
                "    * two points\n",
                "    * a line segment\n",
            ),
            Command::OrientedSame => concat!(
                "Bad selection for same orientation constraint. This ",
                "constraint can apply to:\n\n",
                "    * two normals\n",
            ),
            Command::OtherAngle => "Must select an angle constraint.",
            Command::Reference => "Must select a constraint with associated label.",
            Command::Angle => concat!(
                "Bad selection for angle constraint. This constraint ",
                "can apply to:\n\n",
                "    * two line segments\n",
                "    * a line segment and a normal\n",
                "    * two normals\n",
            ),
            Command::Parallel => concat!(
                "Bad selection for parallel / tangent constraint. This ",
                "constraint can apply to:\n\n",
                "    * two line segments (parallel)\n",
                "    * a line segment and a normal (parallel)\n",
                "    * two normals (parallel)\n",
                "    * a line segment and an arc, that share an endpoint ",
                "(tangent)\n",
                "    * a line segment and a cubic bezier, that share an ",
                "endpoint (tangent)\n",
            ),
            Command::Perpendicular => concat!(
                "Bad selection for perpendicular constraint. This ",
                "constraint can apply to:\n\n",
                "    * two line segments\n",
                "    * a line segment and a normal\n",
                "    * two normals\n",
            ),
            // A comment can be placed with any selection.
            Command::Comment => "",
        }
    }
}
