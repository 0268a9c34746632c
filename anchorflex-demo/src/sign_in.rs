//! The sign-in screen.

use anchorflex::{CrossAxisAlignment, MainAxisAlignment, Node, NodeId, Size, View, column, flex, row, spacer};

/// Tree plus the handles the demo mutates after attaching.
pub struct SignInScreen {
    pub tree: Node,
    pub login_ways: NodeId,
    pub blue_button: NodeId,
    pub pink_button: NodeId,
}

impl SignInScreen {
    pub fn build() -> Self {
        let title = View::with_intrinsic_size("title", Size::new(84.0, 29.0));
        let username = View::with_intrinsic_size("username", Size::new(90.0, 34.0));
        let password = View::with_intrinsic_size("password", Size::new(90.0, 34.0));
        let caption = View::with_intrinsic_size("other-login-ways", Size::new(92.0, 15.0));
        // colour swatches have no content of their own
        let cyan = View::new("cyan-button");
        let blue = View::new("blue-button");
        let pink = View::with_intrinsic_size("pink-button", Size::new(30.0, 30.0));
        let submit = View::with_intrinsic_size("sign-in-button", Size::new(52.0, 30.0));

        let blue_button = flex(1.0).view(blue).key("blue");
        let pink_button = Node::new().view(pink).key("pink");
        let (blue_id, pink_id) = (blue_button.id(), pink_button.id());
        let login_ways = row([flex(1.0).view(cyan), blue_button, pink_button])
            .width(260.0)
            .main_alignment(MainAxisAlignment::SpaceBetween)
            .key("login-ways");
        let login_ways_id = login_ways.id();

        let tree = column([
            spacer(100.0),
            Node::new().view(title),
            spacer(100.0),
            column([
                Node::new().view(username),
                spacer(10.0),
                Node::new().view(password),
            ])
            .width(300.0),
            spacer(30.0),
            column([Node::new().view(caption), spacer(10.0), login_ways])
                .width(300.0)
                .cross_alignment(CrossAxisAlignment::Center),
            flex(1.0),
            Node::new().view(submit),
            spacer(80.0),
        ])
        .cross_alignment(CrossAxisAlignment::Center);

        Self {
            tree,
            login_ways: login_ways_id,
            blue_button: blue_id,
            pink_button: pink_id,
        }
    }
}
