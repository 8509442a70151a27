mod ollama_vision_ocr_test;
