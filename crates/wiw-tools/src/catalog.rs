//! The static tool catalogue: one [`Operation`] per tool, each mapped onto a
//! single `WhenIWorkClient` call.

use serde_json::{Map, Value, json};
use wiw_api::WhenIWorkClient;
use wiw_types::{ApiError, ToolDefinition};

use crate::args::ToolArgs;

/// A documented input property: (name, JSON type, description).
type Field = (&'static str, &'static str, &'static str);

const USER_FIELDS: &[Field] = &[
    ("first_name", "string", "First name"),
    ("last_name", "string", "Last name"),
    ("email", "string", "Email address"),
    ("phone_number", "string", "Phone number"),
    ("role", "integer", "Role: 1 admin, 2 manager, 3 employee, 5 supervisor"),
    ("employee_code", "string", "Employee code"),
    ("hourly_rate", "number", "Hourly pay rate"),
    ("positions", "array", "Position IDs the user can work"),
    ("locations", "array", "Location IDs the user belongs to"),
    ("notes", "string", "Manager notes"),
];

const SHIFT_FIELDS: &[Field] = &[
    ("user_id", "integer", "Assigned user ID (0 for an open shift)"),
    ("location_id", "integer", "Location ID"),
    ("position_id", "integer", "Position ID"),
    ("site_id", "integer", "Job site ID"),
    ("start_time", "string", "Start time (RFC 2822 or ISO 8601)"),
    ("end_time", "string", "End time (RFC 2822 or ISO 8601)"),
    ("break_time", "number", "Unpaid break length in hours"),
    ("color", "string", "Hex color without '#'"),
    ("notes", "string", "Shift notes"),
    ("published", "boolean", "Whether the shift is visible to employees"),
];

const POSITION_FIELDS: &[Field] = &[
    ("name", "string", "Position name"),
    ("color", "string", "Hex color without '#'"),
    ("sort", "integer", "Sort order"),
];

const LOCATION_FIELDS: &[Field] = &[
    ("name", "string", "Location name"),
    ("address", "string", "Street address"),
    ("coordinates", "array", "Latitude and longitude"),
    ("ip_address", "string", "Allowed punch IP address"),
    ("sort", "integer", "Sort order"),
];

const PUNCH_FIELDS: &[Field] = &[
    ("user_id", "integer", "User ID (defaults to the authenticated user)"),
    ("location_id", "integer", "Location ID"),
    ("position_id", "integer", "Position ID"),
    ("shift_id", "integer", "Shift being worked"),
    ("notes", "string", "Punch notes"),
];

const REQUEST_FIELDS: &[Field] = &[
    ("user_id", "integer", "Requesting user ID"),
    ("start_time", "string", "Start of time off"),
    ("end_time", "string", "End of time off"),
    ("type", "integer", "Time-off type ID"),
    ("hours", "number", "Hours requested"),
    ("status", "integer", "0 pending, 1 canceled, 2 accepted, 3 expired, 4 declined"),
    ("message", "string", "Message to the manager"),
];

const AVAILABILITY_FIELDS: &[Field] = &[
    ("user_id", "integer", "User ID"),
    ("day", "integer", "Day of week (0 Sunday .. 6 Saturday)"),
    ("start_time", "string", "Start of the window"),
    ("end_time", "string", "End of the window"),
    ("type", "integer", "1 unavailable, 2 preferred"),
    ("all_day", "boolean", "Whether the window covers the whole day"),
    ("notes", "string", "Notes"),
];

const MESSAGE_FIELDS: &[Field] = &[
    ("subject", "string", "Message subject"),
    ("content", "string", "Message body"),
    ("user_ids", "array", "Recipient user IDs"),
    ("conversation_id", "integer", "Reply into an existing conversation"),
];

const RANGE_FILTERS: &[Field] = &[
    ("start", "string", "Start of the range"),
    ("end", "string", "End of the range"),
    ("user_id", "string", "Comma-separated user IDs"),
    ("location_id", "string", "Comma-separated location IDs"),
];

/// Every tool the server exposes, one variant per tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    ListShifts,
    GetShift,
    CreateShift,
    UpdateShift,
    DeleteShift,
    ListPositions,
    GetPosition,
    CreatePosition,
    UpdatePosition,
    DeletePosition,
    ListLocations,
    GetLocation,
    CreateLocation,
    UpdateLocation,
    DeleteLocation,
    ListTimes,
    ClockIn,
    ClockOut,
    ListRequests,
    GetRequest,
    CreateRequest,
    UpdateRequest,
    CancelRequest,
    ListAvailability,
    GetAvailability,
    CreateAvailability,
    UpdateAvailability,
    DeleteAvailability,
    GetAccount,
    GetPayroll,
    ListMessages,
    GetMessage,
    SendMessage,
}

impl Operation {
    /// All operations, in discovery order.
    pub const ALL: [Operation; 38] = [
        Operation::ListUsers,
        Operation::GetUser,
        Operation::CreateUser,
        Operation::UpdateUser,
        Operation::DeleteUser,
        Operation::ListShifts,
        Operation::GetShift,
        Operation::CreateShift,
        Operation::UpdateShift,
        Operation::DeleteShift,
        Operation::ListPositions,
        Operation::GetPosition,
        Operation::CreatePosition,
        Operation::UpdatePosition,
        Operation::DeletePosition,
        Operation::ListLocations,
        Operation::GetLocation,
        Operation::CreateLocation,
        Operation::UpdateLocation,
        Operation::DeleteLocation,
        Operation::ListTimes,
        Operation::ClockIn,
        Operation::ClockOut,
        Operation::ListRequests,
        Operation::GetRequest,
        Operation::CreateRequest,
        Operation::UpdateRequest,
        Operation::CancelRequest,
        Operation::ListAvailability,
        Operation::GetAvailability,
        Operation::CreateAvailability,
        Operation::UpdateAvailability,
        Operation::DeleteAvailability,
        Operation::GetAccount,
        Operation::GetPayroll,
        Operation::ListMessages,
        Operation::GetMessage,
        Operation::SendMessage,
    ];

    /// The tool name advertised to the agent.
    pub fn name(self) -> &'static str {
        use Operation::*;
        match self {
            ListUsers => "list_users",
            GetUser => "get_user",
            CreateUser => "create_user",
            UpdateUser => "update_user",
            DeleteUser => "delete_user",
            ListShifts => "list_shifts",
            GetShift => "get_shift",
            CreateShift => "create_shift",
            UpdateShift => "update_shift",
            DeleteShift => "delete_shift",
            ListPositions => "list_positions",
            GetPosition => "get_position",
            CreatePosition => "create_position",
            UpdatePosition => "update_position",
            DeletePosition => "delete_position",
            ListLocations => "list_locations",
            GetLocation => "get_location",
            CreateLocation => "create_location",
            UpdateLocation => "update_location",
            DeleteLocation => "delete_location",
            ListTimes => "list_times",
            ClockIn => "clock_in",
            ClockOut => "clock_out",
            ListRequests => "list_requests",
            GetRequest => "get_request",
            CreateRequest => "create_request",
            UpdateRequest => "update_request",
            CancelRequest => "cancel_request",
            ListAvailability => "list_availability",
            GetAvailability => "get_availability",
            CreateAvailability => "create_availability",
            UpdateAvailability => "update_availability",
            DeleteAvailability => "delete_availability",
            GetAccount => "get_account",
            GetPayroll => "get_payroll",
            ListMessages => "list_messages",
            GetMessage => "get_message",
            SendMessage => "send_message",
        }
    }

    /// The descriptor advertised by `tools/list`.
    pub fn definition(self) -> ToolDefinition {
        use Operation::*;
        let name = self.name();
        match self {
            ListUsers => list_tool(
                name,
                "List users in the account",
                &[
                    ("location_id", "string", "Comma-separated location IDs"),
                    ("show_deleted", "boolean", "Include deleted users"),
                    ("search", "string", "Match against name or email"),
                ],
            ),
            GetUser => item_tool(name, "Get a user by ID", "user_id"),
            CreateUser => body_tool(name, "Create a user", USER_FIELDS, &["first_name", "last_name"]),
            UpdateUser => update_tool(name, "Update a user", "user_id", USER_FIELDS),
            DeleteUser => item_tool(name, "Delete a user", "user_id"),

            ListShifts => list_tool(
                name,
                "List shifts in a date range",
                &[
                    RANGE_FILTERS[0],
                    RANGE_FILTERS[1],
                    RANGE_FILTERS[2],
                    RANGE_FILTERS[3],
                    ("position_id", "string", "Comma-separated position IDs"),
                    ("unpublished", "boolean", "Include unpublished shifts"),
                    ("include_open", "boolean", "Include open shifts"),
                ],
            ),
            GetShift => item_tool(name, "Get a shift by ID", "shift_id"),
            CreateShift => body_tool(name, "Create a shift", SHIFT_FIELDS, &["start_time", "end_time"]),
            UpdateShift => update_tool(name, "Update a shift", "shift_id", SHIFT_FIELDS),
            DeleteShift => item_tool(name, "Delete a shift", "shift_id"),

            ListPositions => list_tool(
                name,
                "List positions",
                &[("show_deleted", "boolean", "Include deleted positions")],
            ),
            GetPosition => item_tool(name, "Get a position by ID", "position_id"),
            CreatePosition => body_tool(name, "Create a position", POSITION_FIELDS, &["name"]),
            UpdatePosition => update_tool(name, "Update a position", "position_id", POSITION_FIELDS),
            DeletePosition => item_tool(name, "Delete a position", "position_id"),

            ListLocations => list_tool(
                name,
                "List locations (schedules)",
                &[("show_deleted", "boolean", "Include deleted locations")],
            ),
            GetLocation => item_tool(name, "Get a location by ID", "location_id"),
            CreateLocation => body_tool(name, "Create a location", LOCATION_FIELDS, &["name"]),
            UpdateLocation => update_tool(name, "Update a location", "location_id", LOCATION_FIELDS),
            DeleteLocation => item_tool(name, "Delete a location", "location_id"),

            ListTimes => list_tool(name, "List time-clock entries", RANGE_FILTERS),
            ClockIn => body_tool(name, "Clock a user in", PUNCH_FIELDS, &[]),
            ClockOut => body_tool(name, "Clock a user out", PUNCH_FIELDS, &[]),

            ListRequests => list_tool(
                name,
                "List time-off requests",
                &[
                    RANGE_FILTERS[0],
                    RANGE_FILTERS[1],
                    RANGE_FILTERS[2],
                    RANGE_FILTERS[3],
                    ("status", "string", "Comma-separated status codes"),
                ],
            ),
            GetRequest => item_tool(name, "Get a time-off request by ID", "request_id"),
            CreateRequest => body_tool(
                name,
                "Create a time-off request",
                REQUEST_FIELDS,
                &["start_time", "end_time"],
            ),
            UpdateRequest => update_tool(name, "Update a time-off request", "request_id", REQUEST_FIELDS),
            CancelRequest => item_tool(name, "Cancel a time-off request", "request_id"),

            ListAvailability => list_tool(
                name,
                "List availability windows",
                &[
                    RANGE_FILTERS[0],
                    RANGE_FILTERS[1],
                    ("user_id", "string", "Comma-separated user IDs"),
                ],
            ),
            GetAvailability => item_tool(name, "Get an availability window by ID", "availability_id"),
            CreateAvailability => body_tool(
                name,
                "Create an availability window",
                AVAILABILITY_FIELDS,
                &[],
            ),
            UpdateAvailability => update_tool(
                name,
                "Update an availability window",
                "availability_id",
                AVAILABILITY_FIELDS,
            ),
            DeleteAvailability => item_tool(name, "Delete an availability window", "availability_id"),

            GetAccount => empty_tool(name, "Get the current account"),
            GetPayroll => list_tool(
                name,
                "Get payroll data for a pay period",
                &[
                    RANGE_FILTERS[0],
                    RANGE_FILTERS[1],
                    ("location_id", "string", "Comma-separated location IDs"),
                ],
            ),

            ListMessages => list_tool(
                name,
                "List messages",
                &[("conversation_id", "integer", "Only messages in this conversation")],
            ),
            GetMessage => item_tool(name, "Get a message by ID", "message_id"),
            SendMessage => body_tool(name, "Send a message", MESSAGE_FIELDS, &["content"]),
        }
    }

    /// Run this operation against `client`, extracting what it needs from
    /// `args`.
    pub async fn invoke(self, client: &WhenIWorkClient, args: &ToolArgs) -> Result<Value, ApiError> {
        use Operation::*;
        let params = Some(args.params());
        match self {
            ListUsers => client.list_users(params).await,
            GetUser => client.get_user(args.id("user_id")).await,
            CreateUser => client.create_user(&args.payload()).await,
            UpdateUser => {
                client
                    .update_user(args.id("user_id"), &args.payload_without("user_id"))
                    .await
            }
            DeleteUser => client.delete_user(args.id("user_id")).await,

            ListShifts => client.list_shifts(params).await,
            GetShift => client.get_shift(args.id("shift_id")).await,
            CreateShift => client.create_shift(&args.payload()).await,
            UpdateShift => {
                client
                    .update_shift(args.id("shift_id"), &args.payload_without("shift_id"))
                    .await
            }
            DeleteShift => client.delete_shift(args.id("shift_id")).await,

            ListPositions => client.list_positions(params).await,
            GetPosition => client.get_position(args.id("position_id")).await,
            CreatePosition => client.create_position(&args.payload()).await,
            UpdatePosition => {
                client
                    .update_position(args.id("position_id"), &args.payload_without("position_id"))
                    .await
            }
            DeletePosition => client.delete_position(args.id("position_id")).await,

            ListLocations => client.list_locations(params).await,
            GetLocation => client.get_location(args.id("location_id")).await,
            CreateLocation => client.create_location(&args.payload()).await,
            UpdateLocation => {
                client
                    .update_location(args.id("location_id"), &args.payload_without("location_id"))
                    .await
            }
            DeleteLocation => client.delete_location(args.id("location_id")).await,

            ListTimes => client.list_times(params).await,
            ClockIn => client.clock_in(&args.payload()).await,
            ClockOut => client.clock_out(&args.payload()).await,

            ListRequests => client.list_requests(params).await,
            GetRequest => client.get_request(args.id("request_id")).await,
            CreateRequest => client.create_request(&args.payload()).await,
            UpdateRequest => {
                client
                    .update_request(args.id("request_id"), &args.payload_without("request_id"))
                    .await
            }
            CancelRequest => client.cancel_request(args.id("request_id")).await,

            ListAvailability => client.list_availabilities(params).await,
            GetAvailability => client.get_availability(args.id("availability_id")).await,
            CreateAvailability => client.create_availability(&args.payload()).await,
            UpdateAvailability => {
                client
                    .update_availability(
                        args.id("availability_id"),
                        &args.payload_without("availability_id"),
                    )
                    .await
            }
            DeleteAvailability => client.delete_availability(args.id("availability_id")).await,

            GetAccount => client.get_account().await,
            GetPayroll => client.get_payroll(params).await,

            ListMessages => client.list_messages(params).await,
            GetMessage => client.get_message(args.id("message_id")).await,
            SendMessage => client.send_message(&args.payload()).await,
        }
    }
}

fn properties(fields: &[Field]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, ty, description)| {
            (
                name.to_string(),
                json!({"type": ty, "description": description}),
            )
        })
        .collect()
}

fn definition(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Every argument is passed through as a query parameter.
fn list_tool(name: &str, description: &str, filters: &[Field]) -> ToolDefinition {
    definition(
        name,
        &format!("{description}. Any argument is passed through as a query parameter."),
        json!({
            "type": "object",
            "properties": properties(filters),
            "additionalProperties": true
        }),
    )
}

fn item_tool(name: &str, description: &str, id_key: &str) -> ToolDefinition {
    definition(
        name,
        description,
        json!({
            "type": "object",
            "properties": {
                id_key: {"type": ["integer", "string"], "description": "Resource ID"}
            },
            "required": [id_key]
        }),
    )
}

/// Every argument becomes a field of the JSON body.
fn body_tool(name: &str, description: &str, fields: &[Field], required: &[&str]) -> ToolDefinition {
    definition(
        name,
        &format!("{description}. All arguments are sent as the request body."),
        json!({
            "type": "object",
            "properties": properties(fields),
            "required": required,
            "additionalProperties": true
        }),
    )
}

/// The id argument selects the resource; the rest becomes the JSON body.
fn update_tool(name: &str, description: &str, id_key: &str, fields: &[Field]) -> ToolDefinition {
    let mut props = properties(fields);
    props.insert(
        id_key.to_string(),
        json!({"type": ["integer", "string"], "description": "Resource ID"}),
    );
    definition(
        name,
        &format!("{description}. Arguments other than {id_key} are sent as the request body."),
        json!({
            "type": "object",
            "properties": props,
            "required": [id_key],
            "additionalProperties": true
        }),
    )
}

fn empty_tool(name: &str, description: &str) -> ToolDefinition {
    definition(
        name,
        description,
        json!({"type": "object", "properties": {}}),
    )
}
