pub mod lambda_layer;
